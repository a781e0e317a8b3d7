pub mod celebration;
pub mod constants;
pub mod error;
pub mod outcome;
pub mod rotation;
pub mod shared_wheel_game;
pub mod validation;
pub mod wheel_layout;

#[cfg(test)]
mod test_rng;

pub use error::WheelError;
pub use outcome::{select_outcome, Outcome};
pub use rotation::{plan_rotation, RotationParams, RotationPlan, TickTracker};
pub use shared_wheel_game::{
    PrizeEntry, PrizeTable, RigConfiguration, RigMode, SpinPhase, SpinState, DEFAULT_PRIZES,
};
