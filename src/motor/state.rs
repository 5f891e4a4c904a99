//! Calibration and controller states.

/// Whether the position reference can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// No reference; requests are refused.
    #[default]
    Uncalibrated,
    /// Seeking the ground limit.
    Homing,
    /// Position is trustworthy.
    Calibrated,
}

/// What the controller is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElevatorState {
    /// Waiting for a request.
    #[default]
    Idle,
    /// Executing a move.
    Moving,
    /// Bouncing off the ground limit after an unexpected contact.
    Recalibrating,
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name(&self) -> &'static str;
}

impl StateName for CalibrationState {
    fn name(&self) -> &'static str {
        match self {
            CalibrationState::Uncalibrated => "Uncalibrated",
            CalibrationState::Homing => "Homing",
            CalibrationState::Calibrated => "Calibrated",
        }
    }
}

impl StateName for ElevatorState {
    fn name(&self) -> &'static str {
        match self {
            ElevatorState::Idle => "Idle",
            ElevatorState::Moving => "Moving",
            ElevatorState::Recalibrating => "Recalibrating",
        }
    }
}
