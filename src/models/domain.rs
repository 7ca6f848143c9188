use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type TeamId = i32;
pub type TaId = i32;
pub type SkillId = i32;

/// A student team and the skills it needs from its TAs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "teamId")]
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: BTreeSet<SkillId>,
}

impl Team {
    pub fn new(id: TeamId, skills: impl IntoIterator<Item = SkillId>) -> Self {
        Self {
            id,
            name: format!("Team {}", id),
            skills: skills.into_iter().collect(),
        }
    }
}

/// A teaching assistant and the skills they can offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ta {
    #[serde(rename = "taId")]
    pub id: TaId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: BTreeSet<SkillId>,
}

impl Ta {
    pub fn new(id: TaId, skills: impl IntoIterator<Item = SkillId>) -> Self {
        Self {
            id,
            name: format!("TA {}", id),
            skills: skills.into_iter().collect(),
        }
    }
}

/// Skill tag as stored in the course database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(rename = "bgColor")]
    pub bg_color: String,
    pub color: String,
    pub icon: String,
}

/// Input triple for one allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub teams: Vec<Team>,
    pub tas: Vec<Ta>,
    #[serde(rename = "tasPerTeam")]
    pub tas_per_team: usize,
}

/// TAs assigned to a single team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    #[serde(rename = "teamId")]
    pub team_id: TeamId,
    #[serde(rename = "assignedTaIds")]
    pub assigned_ta_ids: Vec<TaId>,
}

/// A team that ended a run with fewer than `n` TAs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledTeam {
    #[serde(rename = "teamId")]
    pub team_id: TeamId,
    pub assigned: usize,
    pub missing: usize,
}

/// Persisted form of one team-TA pair (`team_tas` row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamTaLink {
    pub team_id: TeamId,
    pub ta_id: TaId,
}

/// Output of one allocation run
///
/// `assignments` holds one entry per input team, in input order, including
/// teams that received no TA at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(rename = "tasPerTeam")]
    pub tas_per_team: usize,
    #[serde(rename = "maxTeamsPerTa")]
    pub max_teams_per_ta: usize,
    pub assignments: Vec<TeamAssignment>,
}

impl Allocation {
    pub fn empty(tas_per_team: usize, max_teams_per_ta: usize) -> Self {
        Self {
            tas_per_team,
            max_teams_per_ta,
            assignments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of teams covered
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// TAs assigned to a team, or `None` if the team was not part of the run
    pub fn get(&self, team_id: TeamId) -> Option<&[TaId]> {
        self.assignments
            .iter()
            .find(|a| a.team_id == team_id)
            .map(|a| a.assigned_ta_ids.as_slice())
    }

    /// Number of teams each assigned TA ended up on
    pub fn ta_load(&self) -> HashMap<TaId, usize> {
        let mut load = HashMap::new();
        for ta_id in self.assignments.iter().flat_map(|a| a.assigned_ta_ids.iter()) {
            *load.entry(*ta_id).or_insert(0) += 1;
        }
        load
    }

    /// Teams that received fewer than `tas_per_team` TAs
    pub fn unfilled(&self) -> Vec<UnfilledTeam> {
        self.assignments
            .iter()
            .filter(|a| a.assigned_ta_ids.len() < self.tas_per_team)
            .map(|a| UnfilledTeam {
                team_id: a.team_id,
                assigned: a.assigned_ta_ids.len(),
                missing: self.tas_per_team - a.assigned_ta_ids.len(),
            })
            .collect()
    }

    /// Flattened team-TA pairs, ready to be persisted
    pub fn links(&self) -> impl Iterator<Item = TeamTaLink> + '_ {
        self.assignments.iter().flat_map(|a| {
            a.assigned_ta_ids.iter().map(move |ta_id| TeamTaLink {
                team_id: a.team_id,
                ta_id: *ta_id,
            })
        })
    }

    pub fn total_assigned(&self) -> usize {
        self.assignments.iter().map(|a| a.assigned_ta_ids.len()).sum()
    }
}

/// Ranked team-TA candidate produced by the scoring stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPair {
    pub team_index: usize,
    pub ta_index: usize,
    pub team_id: TeamId,
    pub ta_id: TaId,
    pub match_score: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Allocation {
        Allocation {
            tas_per_team: 2,
            max_teams_per_ta: 2,
            assignments: vec![
                TeamAssignment { team_id: 1, assigned_ta_ids: vec![10, 11] },
                TeamAssignment { team_id: 2, assigned_ta_ids: vec![10] },
                TeamAssignment { team_id: 3, assigned_ta_ids: vec![] },
            ],
        }
    }

    #[test]
    fn test_unfilled_reports_shortfall() {
        let unfilled = sample().unfilled();
        assert_eq!(
            unfilled,
            vec![
                UnfilledTeam { team_id: 2, assigned: 1, missing: 1 },
                UnfilledTeam { team_id: 3, assigned: 0, missing: 2 },
            ]
        );
    }

    #[test]
    fn test_links_and_load() {
        let allocation = sample();
        let links: Vec<TeamTaLink> = allocation.links().collect();
        assert_eq!(links.len(), 3);
        assert_eq!(allocation.total_assigned(), 3);
        assert_eq!(allocation.ta_load().get(&10), Some(&2));
        assert_eq!(allocation.get(3), Some(&[][..]));
        assert_eq!(allocation.get(99), None);
    }

    #[test]
    fn test_team_deserializes_without_skills() {
        let team: Team = serde_json::from_str(r#"{"teamId": 7}"#).unwrap();
        assert_eq!(team.id, 7);
        assert!(team.skills.is_empty());
    }
}
