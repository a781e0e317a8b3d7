use shared::WheelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpinnerError {
    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },
    #[error("reveal delay of {reveal_ms}ms would show the result before the {spin_ms}ms spin settles")]
    RevealBeforeSettle { reveal_ms: u64, spin_ms: u64 },
    #[error("{0}")]
    Wheel(#[from] WheelError),
    #[error("rejected setting: {0}")]
    Validation(String),
    #[error("unrecognised admin command: {0}")]
    Admin(String),
    #[error("unknown command {0:?}, type `help`")]
    UnknownCommand(String),
    #[error("wheel runtime has shut down")]
    ChannelClosed,
}

impl From<validator::ValidationError> for SpinnerError {
    fn from(err: validator::ValidationError) -> Self {
        SpinnerError::Validation(err.code.to_string())
    }
}
