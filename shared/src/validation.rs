use validator::ValidationError;
use crate::shared_wheel_game::{PrizeTable, RigConfiguration, RigMode};

pub fn validate_win_probability(percent: f64) -> Result<(), ValidationError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::new("win_probability_out_of_range"));
    }
    Ok(())
}

/// Target ids that miss the table are still accepted: spins fall back to a
/// default entry. This only reports whether the target resolves to a prize.
pub fn validate_target_prize(table: &PrizeTable, id: u32) -> Result<(), ValidationError> {
    match table.find(id) {
        Some((_, prize)) if prize.is_win => Ok(()),
        Some(_) => Err(ValidationError::new("target_is_not_a_win")),
        None => Err(ValidationError::new("unknown_target_prize")),
    }
}

/// Checks a full configuration. Only a bad probability is fatal; a target
/// warning is returned separately so callers can log it and carry on.
pub fn validate_rig_configuration(
    table: &PrizeTable,
    config: &RigConfiguration,
) -> Result<Option<ValidationError>, ValidationError> {
    validate_win_probability(config.win_probability_percent)?;

    let target_matters = config.mode != RigMode::AlwaysLose;
    Ok(target_matters
        .then(|| validate_target_prize(table, config.target_prize_id).err())
        .flatten())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_wheel_game::DEFAULT_PRIZES;

    #[test]
    fn test_probability_range() {
        assert!(validate_win_probability(0.0).is_ok());
        assert!(validate_win_probability(100.0).is_ok());
        assert!(validate_win_probability(-0.1).is_err());
        assert!(validate_win_probability(100.5).is_err());
        assert!(validate_win_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_target_checks() {
        assert!(validate_target_prize(&DEFAULT_PRIZES, 4).is_ok());
        assert_eq!(
            validate_target_prize(&DEFAULT_PRIZES, 5).unwrap_err().code,
            "target_is_not_a_win"
        );
        assert_eq!(
            validate_target_prize(&DEFAULT_PRIZES, 40).unwrap_err().code,
            "unknown_target_prize"
        );
    }

    #[test]
    fn test_full_configuration() {
        let mut config = RigConfiguration { target_prize_id: 40, ..RigConfiguration::default() };
        // always-lose never reads the target
        assert!(matches!(validate_rig_configuration(&DEFAULT_PRIZES, &config), Ok(None)));

        config.mode = RigMode::ForceSpecific;
        let warning = validate_rig_configuration(&DEFAULT_PRIZES, &config).unwrap();
        assert_eq!(warning.unwrap().code, "unknown_target_prize");

        config.win_probability_percent = 120.0;
        assert!(validate_rig_configuration(&DEFAULT_PRIZES, &config).is_err());
    }
}
