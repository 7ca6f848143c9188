use std::collections::BTreeSet;
use crate::models::{ScoredPair, SkillId, Ta, Team};

/// Number of skills a team needs that a TA has
#[inline]
pub fn skill_overlap(team_skills: &BTreeSet<SkillId>, ta_skills: &BTreeSet<SkillId>) -> usize {
    team_skills.intersection(ta_skills).count()
}

/// Score every team-TA pair and rank them for the greedy pass
///
/// Pairs are enumerated teams-outer, TAs-inner. Pairs without any shared
/// skill are dropped. The sort is stable, so equal scores keep enumeration
/// order and the ranking is fully determined by input order.
pub fn rank_pairs(teams: &[Team], tas: &[Ta]) -> Vec<ScoredPair> {
    let mut pairs: Vec<ScoredPair> = teams
        .iter()
        .enumerate()
        .flat_map(move |(team_index, team)| {
            tas.iter().enumerate().filter_map(move |(ta_index, ta)| {
                let match_score = skill_overlap(&team.skills, &ta.skills);
                (match_score > 0).then_some(ScoredPair {
                    team_index,
                    ta_index,
                    team_id: team.id,
                    ta_id: ta.id,
                    match_score,
                })
            })
        })
        .collect();

    pairs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_overlap() {
        let a: BTreeSet<SkillId> = [1, 2, 3].into_iter().collect();
        let b: BTreeSet<SkillId> = [2, 3, 4].into_iter().collect();
        assert_eq!(skill_overlap(&a, &b), 2);
        assert_eq!(skill_overlap(&a, &BTreeSet::new()), 0);
    }

    #[test]
    fn test_zero_overlap_pairs_dropped() {
        let teams = vec![Team::new(1, [1]), Team::new(2, [])];
        let tas = vec![Ta::new(10, [2]), Ta::new(11, [1])];
        let ranked = rank_pairs(&teams, &tas);
        assert_eq!(ranked.len(), 1);
        assert_eq!((ranked[0].team_id, ranked[0].ta_id), (1, 11));
    }

    #[test]
    fn test_ranked_by_score_then_enumeration_order() {
        let teams = vec![Team::new(1, [1, 2]), Team::new(2, [1, 2, 3])];
        let tas = vec![Ta::new(10, [1]), Ta::new(11, [1, 2, 3])];
        let ranked: Vec<(i32, i32, usize)> = rank_pairs(&teams, &tas)
            .into_iter()
            .map(|p| (p.team_id, p.ta_id, p.match_score))
            .collect();

        assert_eq!(
            ranked,
            vec![(2, 11, 3), (1, 11, 2), (1, 10, 1), (2, 10, 1)]
        );
    }
}
