//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::ElevatorConfig;

/// Validate an elevator configuration.
///
/// Checks:
/// - At least one floor, heights non-negative and strictly ascending
/// - Floor names are unique
/// - Motion constants are positive and the ramp delays are ordered
/// - The full travel in steps fits a `u32`
/// - Health interval and trust threshold are positive
pub fn validate_config(config: &ElevatorConfig) -> Result<()> {
    validate_floors(config)?;
    validate_motion(&config.motion)?;
    validate_travel(config)?;

    if config.driver.health_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidHealthInterval(
            config.driver.health_interval_ms,
        )));
    }

    if config.correction.trust_threshold_mm <= 0 {
        return Err(Error::Config(ConfigError::InvalidTrustThreshold(
            config.correction.trust_threshold_mm,
        )));
    }

    Ok(())
}

fn validate_floors(config: &ElevatorConfig) -> Result<()> {
    if config.floors.is_empty() {
        return Err(Error::Config(ConfigError::NoFloors));
    }

    for (i, floor) in config.floors.iter().enumerate() {
        if floor.height_mm.0 < 0 {
            return Err(Error::Config(ConfigError::NegativeHeight {
                floor: floor.name.clone(),
                height_mm: floor.height_mm.0,
            }));
        }

        if i > 0 && floor.height_mm <= config.floors[i - 1].height_mm {
            return Err(Error::Config(ConfigError::UnorderedFloors {
                floor: floor.name.clone(),
            }));
        }

        if config.floors[..i].iter().any(|f| f.name == floor.name) {
            return Err(Error::Config(ConfigError::DuplicateFloorName(
                floor.name.clone(),
            )));
        }
    }

    Ok(())
}

fn validate_motion(motion: &super::MotionConfig) -> Result<()> {
    if motion.steps_per_mm == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm(motion.steps_per_mm)));
    }

    if motion.ramp_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidRampSteps(motion.ramp_steps)));
    }

    if motion.max_speed_delay_us == 0 || motion.min_speed_delay_us < motion.max_speed_delay_us {
        return Err(Error::Config(ConfigError::InvalidSpeedDelays {
            min_speed_us: motion.min_speed_delay_us,
            max_speed_us: motion.max_speed_delay_us,
        }));
    }

    if motion.tolerance_mm <= 0 {
        return Err(Error::Config(ConfigError::InvalidTolerance(motion.tolerance_mm)));
    }

    Ok(())
}

fn validate_travel(config: &ElevatorConfig) -> Result<()> {
    let max_height = config.max_height().0;
    let steps_per_mm = config.motion.steps_per_mm;
    let travel = u64::from(max_height.unsigned_abs()) * u64::from(steps_per_mm);

    if travel > u64::from(u32::MAX) {
        return Err(Error::Config(ConfigError::TravelTooLong {
            max_height_mm: max_height,
            steps_per_mm,
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FloorConfig, MotionConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ElevatorConfig::default()).is_ok());
    }

    #[test]
    fn test_inverted_speed_delays() {
        let motion = MotionConfig {
            min_speed_delay_us: 100,
            max_speed_delay_us: 200,
            ..MotionConfig::default()
        };

        assert!(matches!(
            validate_motion(&motion),
            Err(Error::Config(ConfigError::InvalidSpeedDelays { .. }))
        ));
    }

    #[test]
    fn test_travel_exceeding_step_counter() {
        let mut config = ElevatorConfig::default();
        config.floors.clear();
        config.floors.push(FloorConfig::new("ground", 0)).unwrap();
        config.floors.push(FloorConfig::new("top", 20_000_000)).unwrap();

        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::TravelTooLong {
                max_height_mm: 20_000_000,
                steps_per_mm: 350,
            }))
        );

        // 12_271_335 mm * 350 steps/mm still fits.
        config.floors[1] = FloorConfig::new("top", 12_271_335);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_floor_name() {
        let mut config = ElevatorConfig::default();
        config.floors.clear();
        config.floors.push(FloorConfig::new("a", 0)).unwrap();
        config.floors.push(FloorConfig::new("a", 100)).unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicateFloorName(_)))
        ));
    }

    #[test]
    fn test_negative_height() {
        let mut config = ElevatorConfig::default();
        config.floors.clear();
        config.floors.push(FloorConfig::new("pit", -20)).unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::NegativeHeight { height_mm: -20, .. }))
        ));
    }

    #[test]
    fn test_no_floors() {
        let mut config = ElevatorConfig::default();
        config.floors.clear();

        assert_eq!(validate_config(&config), Err(Error::Config(ConfigError::NoFloors)));
    }
}
