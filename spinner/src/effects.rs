use serde::Serialize;
use shared::wheel_layout::SliceDefinition;
use shared::{PrizeEntry, SpinPhase};
use thiserror::Error;

/// Everything a renderer needs for one frame of the wheel.
#[derive(Debug, Clone, Serialize)]
pub struct WheelView<'a> {
    pub phase: SpinPhase,
    pub current_rotation: f64,
    pub is_spinning: bool,
    pub slices: &'a [SliceDefinition],
    pub result: Option<&'a PrizeEntry>,
}

pub trait WheelRenderer: Send {
    fn render(&mut self, view: &WheelView<'_>);
}

pub trait CelebrationEffects: Send {
    /// Called when a reveal lands on a winning slice.
    fn celebrate(&mut self, is_winning: bool);
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Short cues. Failures are reported but never interrupt a spin.
pub trait AudioFeedback: Send {
    fn play_outcome(&mut self, outcome_is_win: bool) -> Result<(), AudioError>;
    fn play_tick(&mut self) -> Result<(), AudioError>;
}

pub struct Collaborators {
    pub renderer: Box<dyn WheelRenderer>,
    pub celebration: Box<dyn CelebrationEffects>,
    pub audio: Box<dyn AudioFeedback>,
}

/// No-op collaborators, for headless runs.
pub struct Silent;

impl WheelRenderer for Silent {
    fn render(&mut self, _view: &WheelView<'_>) {}
}

impl CelebrationEffects for Silent {
    fn celebrate(&mut self, _is_winning: bool) {}
}

impl AudioFeedback for Silent {
    fn play_outcome(&mut self, _outcome_is_win: bool) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_tick(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

impl Collaborators {
    pub fn silent() -> Self {
        Self {
            renderer: Box::new(Silent),
            celebration: Box::new(Silent),
            audio: Box::new(Silent),
        }
    }
}
