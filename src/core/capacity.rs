use crate::core::error::AllocationError;

/// Maximum number of teams a single TA may take in one run
///
/// `ceil(team_count * tas_per_team / ta_count)`, never less than 1, so that
/// total TA capacity always covers total demand and every TA can receive at
/// least one team.
pub fn max_teams_per_ta(
    team_count: usize,
    tas_per_team: usize,
    ta_count: usize,
) -> Result<usize, AllocationError> {
    if ta_count == 0 {
        return Err(AllocationError::NoAvailableTas);
    }
    if tas_per_team == 0 {
        return Err(AllocationError::InvalidParameter(
            "n must be positive".to_string(),
        ));
    }

    let demand = team_count.checked_mul(tas_per_team).ok_or_else(|| {
        AllocationError::InvalidParameter(format!(
            "demand of {} teams x {} TAs overflows",
            team_count, tas_per_team
        ))
    })?;

    Ok(demand.div_ceil(ta_count).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Floor division followed by a single remainder bump, as the course
    /// backend originally computed it
    fn two_step(team_count: usize, n: usize, ta_count: usize) -> usize {
        let mut cap = (team_count * n) / ta_count;
        if team_count * n > ta_count * cap {
            cap += 1;
        }
        if cap == 0 {
            cap = 1;
        }
        cap
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(max_teams_per_ta(4, 2, 4).unwrap(), 2);
        assert_eq!(max_teams_per_ta(3, 1, 3).unwrap(), 1);
    }

    #[test]
    fn test_rounds_up_on_remainder() {
        assert_eq!(max_teams_per_ta(3, 2, 1).unwrap(), 6);
        assert_eq!(max_teams_per_ta(5, 1, 2).unwrap(), 3);
        assert_eq!(max_teams_per_ta(7, 3, 4).unwrap(), 6);
    }

    #[test]
    fn test_clamps_to_one() {
        assert_eq!(max_teams_per_ta(0, 2, 5).unwrap(), 1);
        assert_eq!(max_teams_per_ta(1, 1, 10).unwrap(), 1);
    }

    #[test]
    fn test_empty_ta_roster() {
        assert_eq!(max_teams_per_ta(3, 2, 0), Err(AllocationError::NoAvailableTas));
    }

    #[test]
    fn test_zero_n_rejected() {
        assert!(matches!(
            max_teams_per_ta(3, 0, 2),
            Err(AllocationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            max_teams_per_ta(usize::MAX, 2, 1),
            Err(AllocationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_dominates_two_step_rule_and_covers_demand() {
        for teams in 0..25 {
            for n in 1..6 {
                for tas in 1..25 {
                    let cap = max_teams_per_ta(teams, n, tas).unwrap();
                    assert!(cap >= two_step(teams, n, tas), "teams={teams} n={n} tas={tas}");
                    assert!(cap * tas >= teams * n, "teams={teams} n={n} tas={tas}");
                    assert!(cap >= 1);
                }
            }
        }
    }
}
