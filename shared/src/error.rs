use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("prize table is empty")]
    EmptyTable,
    #[error("prize id {0} appears more than once")]
    DuplicatePrizeId(u32),
    #[error("prize table needs at least one losing entry")]
    NoLosingEntry,
    #[error("prize table needs at least one winning entry")]
    NoWinningEntry,
    #[error("slice index {index} is out of range for {count} slices")]
    SliceOutOfRange { index: usize, count: usize },
    #[error("current rotation {0} is not a finite, non-negative angle")]
    InvalidRotation(f64),
    #[error("extra turn range {min}..={max} must start at one or more turns")]
    InvalidTurnRange { min: u32, max: u32 },
    #[error("landing band {min}+{span} must lie strictly inside the slice")]
    InvalidLandingBand { min: f64, span: f64 },
}
