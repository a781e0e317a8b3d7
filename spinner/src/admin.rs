use std::str::FromStr;
use serde_json::json;
use shared::validation::{validate_target_prize, validate_win_probability};
use shared::{PrizeTable, RigConfiguration, RigMode};
use tracing::{info, warn};
use crate::error::SpinnerError;

/// Operator commands for the rigging panel.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    SetMode(RigMode),
    SetChance(f64),
    SetTarget(u32),
    Show,
}

impl FromStr for AdminCommand {
    type Err = SpinnerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();
        let bad = || SpinnerError::Admin(input.trim().to_string());

        if words.next().is_some() {
            return Err(bad());
        }

        match (verb.as_str(), arg) {
            ("mode", Some(mode)) => mode.parse().map(AdminCommand::SetMode).map_err(|_| bad()),
            ("chance", Some(pct)) => pct
                .trim_end_matches('%')
                .parse()
                .map(AdminCommand::SetChance)
                .map_err(|_| bad()),
            ("target", Some(id)) => id.parse().map(AdminCommand::SetTarget).map_err(|_| bad()),
            ("show", None) => Ok(AdminCommand::Show),
            _ => Err(bad()),
        }
    }
}

/// Applies a command to the live rigging and returns a reply for the operator.
///
/// A chance outside 0-100 is rejected. A target that is unknown or not a
/// winning prize is accepted with a warning; spins fall back to a default
/// entry for it.
pub fn apply(
    rig: &mut RigConfiguration,
    table: &PrizeTable,
    command: AdminCommand,
) -> Result<String, SpinnerError> {
    match command {
        AdminCommand::SetMode(mode) => {
            rig.mode = mode;
            info!(mode = %mode, "rig mode changed");
            Ok(format!("mode set to {}", mode))
        }
        AdminCommand::SetChance(percent) => {
            validate_win_probability(percent)?;
            rig.win_probability_percent = percent;
            info!(percent, "win chance changed");
            Ok(format!("win chance set to {}%", percent))
        }
        AdminCommand::SetTarget(id) => {
            rig.target_prize_id = id;
            match validate_target_prize(table, id) {
                Ok(()) => {
                    info!(prize_id = id, "target prize changed");
                    Ok(format!("target prize set to {}", id))
                }
                Err(e) => {
                    warn!(prize_id = id, reason = %e.code, "target prize will fall back to a default entry");
                    Ok(format!("target prize set to {} (warning: {})", id, e.code))
                }
            }
        }
        AdminCommand::Show => {
            let winners: Vec<_> = table
                .winners()
                .map(|p| json!({ "id": p.id, "label": p.label }))
                .collect();
            let report = json!({ "rig": rig, "winning_prizes": winners });
            Ok(serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string()))
        }
    }
}
