use std::str::FromStr;
use std::time::Duration;
use shared::constants::{FRAME_INTERVAL_MS, REVEAL_SLACK_MS, SPIN_DURATION_MS};
use shared::validation::validate_win_probability;
use shared::{RigConfiguration, RigMode, RotationParams};
use crate::error::SpinnerError;

/// Runtime settings, read from the environment (and `.env`) at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfig {
    pub spin_duration: Duration,
    /// Time from spin start to reveal. Never shorter than `spin_duration`.
    pub reveal_delay: Duration,
    pub frame_interval: Duration,
    pub rotation: RotationParams,
    pub rig: RigConfiguration,
    pub seed: Option<u64>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration: Duration::from_millis(SPIN_DURATION_MS),
            reveal_delay: Duration::from_millis(SPIN_DURATION_MS + REVEAL_SLACK_MS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
            rotation: RotationParams::default(),
            rig: RigConfiguration::default(),
            seed: None,
        }
    }
}

impl WheelConfig {
    pub fn from_env() -> Result<Self, SpinnerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SpinnerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let spin_ms = parse_var(&lookup, "WHEEL_SPIN_DURATION_MS")?
            .unwrap_or(SPIN_DURATION_MS);
        let reveal_ms = parse_var(&lookup, "WHEEL_REVEAL_DELAY_MS")?
            .unwrap_or(spin_ms + REVEAL_SLACK_MS);
        let frame_ms = parse_var(&lookup, "WHEEL_FRAME_MS")?.unwrap_or(FRAME_INTERVAL_MS);

        let rotation = RotationParams {
            min_extra_turns: parse_var(&lookup, "WHEEL_MIN_TURNS")?
                .unwrap_or(defaults.rotation.min_extra_turns),
            max_extra_turns: parse_var(&lookup, "WHEEL_MAX_TURNS")?
                .unwrap_or(defaults.rotation.max_extra_turns),
            landing_min: parse_var(&lookup, "WHEEL_OFFSET_MIN")?
                .unwrap_or(defaults.rotation.landing_min),
            landing_span: parse_var(&lookup, "WHEEL_OFFSET_SPAN")?
                .unwrap_or(defaults.rotation.landing_span),
        };

        let rig = RigConfiguration {
            mode: parse_var::<RigMode, _>(&lookup, "WHEEL_RIG_MODE")?
                .unwrap_or(defaults.rig.mode),
            win_probability_percent: parse_var(&lookup, "WHEEL_WIN_CHANCE")?
                .unwrap_or(defaults.rig.win_probability_percent),
            target_prize_id: parse_var(&lookup, "WHEEL_TARGET_ID")?
                .unwrap_or(defaults.rig.target_prize_id),
        };

        let config = Self {
            spin_duration: Duration::from_millis(spin_ms),
            reveal_delay: Duration::from_millis(reveal_ms),
            frame_interval: Duration::from_millis(frame_ms),
            rotation,
            rig,
            seed: parse_var(&lookup, "WHEEL_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SpinnerError> {
        if self.reveal_delay < self.spin_duration {
            return Err(SpinnerError::RevealBeforeSettle {
                reveal_ms: self.reveal_delay.as_millis() as u64,
                spin_ms: self.spin_duration.as_millis() as u64,
            });
        }
        if self.spin_duration.is_zero() {
            return Err(SpinnerError::Config {
                key: "WHEEL_SPIN_DURATION_MS",
                value: "0".to_string(),
            });
        }
        if self.frame_interval.is_zero() {
            return Err(SpinnerError::Config {
                key: "WHEEL_FRAME_MS",
                value: "0".to_string(),
            });
        }
        self.rotation.validate()?;
        validate_win_probability(self.rig.win_probability_percent)?;
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, SpinnerError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SpinnerError::Config { key, value: raw }),
    }
}
