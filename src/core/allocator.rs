use std::collections::HashSet;
use crate::core::{capacity::max_teams_per_ta, error::AllocationError, scoring::rank_pairs};
use crate::models::{Allocation, Ta, Team, TeamAssignment};

/// TA-to-team allocation engine
///
/// # Pipeline Stages
/// 1. Per-TA capacity from total demand and TA supply
/// 2. Skill-overlap scoring of every team-TA pair
/// 3. Greedy pass over pairs ranked by score
/// 4. Fallback pass filling remaining slots with the least-loaded TAs
///
/// The engine holds no state between runs; each call depends only on its
/// arguments and their order.
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    tas_per_team: usize,
}

impl Allocator {
    pub fn new(tas_per_team: usize) -> Result<Self, AllocationError> {
        if tas_per_team == 0 {
            return Err(AllocationError::InvalidParameter(
                "n must be positive".to_string(),
            ));
        }
        Ok(Self { tas_per_team })
    }

    pub fn tas_per_team(&self) -> usize {
        self.tas_per_team
    }

    /// Assign TAs to teams
    ///
    /// # Arguments
    /// * `teams` - Team roster, in the order that breaks ties
    /// * `tas` - TA roster, in the order that breaks ties
    ///
    /// # Returns
    /// An allocation covering every team in `teams`, in the same order.
    /// Teams may hold fewer than `n` TAs when supply or capacity runs out.
    pub fn allocate(&self, teams: &[Team], tas: &[Ta]) -> Result<Allocation, AllocationError> {
        let n = self.tas_per_team;
        let capacity = max_teams_per_ta(teams.len(), n, tas.len())?;
        validate_rosters(teams, tas)?;

        if teams.is_empty() {
            tracing::debug!("No teams to allocate ({} TAs available)", tas.len());
            return Ok(Allocation::empty(n, capacity));
        }

        let mut team_slots: Vec<Vec<usize>> = vec![Vec::with_capacity(n); teams.len()];
        let mut ta_load: Vec<usize> = vec![0; tas.len()];

        // Greedy pass
        let ranked = rank_pairs(teams, tas);
        for pair in &ranked {
            if team_slots[pair.team_index].len() < n && ta_load[pair.ta_index] < capacity {
                team_slots[pair.team_index].push(pair.ta_index);
                ta_load[pair.ta_index] += 1;
            }
        }
        let greedy_assigned: usize = ta_load.iter().sum();

        // Fallback pass
        for slots in team_slots.iter_mut() {
            while slots.len() < n {
                let candidate = (0..tas.len())
                    .filter(|ta_index| !slots.contains(ta_index))
                    .min_by_key(|&ta_index| (ta_load[ta_index], ta_index));

                match candidate {
                    Some(ta_index) if ta_load[ta_index] < capacity => {
                        slots.push(ta_index);
                        ta_load[ta_index] += 1;
                    }
                    _ => break,
                }
            }
        }
        let total_assigned: usize = ta_load.iter().sum();

        let allocation = Allocation {
            tas_per_team: n,
            max_teams_per_ta: capacity,
            assignments: teams
                .iter()
                .zip(team_slots)
                .map(|(team, slots)| TeamAssignment {
                    team_id: team.id,
                    assigned_ta_ids: slots.into_iter().map(|i| tas[i].id).collect(),
                })
                .collect(),
        };

        tracing::info!(
            "Allocated {} slots for {} teams across {} TAs (n: {}, max teams per TA: {}, greedy: {}, fallback: {}, scored pairs: {})",
            total_assigned,
            teams.len(),
            tas.len(),
            n,
            capacity,
            greedy_assigned,
            total_assigned - greedy_assigned,
            ranked.len()
        );

        Ok(allocation)
    }
}

/// Run one allocation: validates `n`, then delegates to [`Allocator::allocate`]
pub fn run_allocation(n: usize, teams: &[Team], tas: &[Ta]) -> Result<Allocation, AllocationError> {
    Allocator::new(n)?.allocate(teams, tas)
}

fn validate_rosters(teams: &[Team], tas: &[Ta]) -> Result<(), AllocationError> {
    let mut seen_teams = HashSet::with_capacity(teams.len());
    if let Some(team) = teams.iter().find(|t| !seen_teams.insert(t.id)) {
        return Err(AllocationError::DuplicateTeam(team.id));
    }

    let mut seen_tas = HashSet::with_capacity(tas.len());
    if let Some(ta) = tas.iter().find(|t| !seen_tas.insert(t.id)) {
        return Err(AllocationError::DuplicateTa(ta.id));
    }

    Ok(())
}
