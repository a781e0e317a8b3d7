use rand::Rng;
use serde::Serialize;
use crate::shared_wheel_game::{PrizeEntry, PrizeTable, RigConfiguration, RigMode};

/// The entry chosen for a spin, with its slice on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome<'a> {
    pub slice_index: usize,
    pub prize: &'a PrizeEntry,
    /// The 0-100 draw that decided a `Probability` spin.
    pub roll: Option<f64>,
}

impl<'a> Outcome<'a> {
    fn at((slice_index, prize): (usize, &'a PrizeEntry)) -> Self {
        Self { slice_index, prize, roll: None }
    }
}

/// Picks the spin's entry according to the rigging mode.
///
/// Unknown target ids never fail: `ForceSpecific` falls back to the first
/// losing entry and a winning `Probability` draw falls back to the first
/// winning entry.
pub fn select_outcome<'a, R: Rng + ?Sized>(
    table: &'a PrizeTable,
    config: &RigConfiguration,
    rng: &mut R,
) -> Outcome<'a> {
    match config.mode {
        RigMode::AlwaysLose => random_loser(table, rng),
        RigMode::ForceSpecific => match table.find(config.target_prize_id) {
            Some(found) => Outcome::at(found),
            None => Outcome::at(table.first_loser()),
        },
        RigMode::Probability => {
            let roll = rng.gen::<f64>() * 100.0;
            // a zero chance never wins, even on a roll of exactly 0
            let wins = config.win_probability_percent > 0.0
                && roll <= config.win_probability_percent;

            let mut outcome = if wins {
                let found = table
                    .find(config.target_prize_id)
                    .unwrap_or_else(|| table.first_winner());
                Outcome::at(found)
            } else {
                random_loser(table, rng)
            };
            outcome.roll = Some(roll);
            outcome
        }
    }
}

fn random_loser<'a, R: Rng + ?Sized>(table: &'a PrizeTable, rng: &mut R) -> Outcome<'a> {
    let losing = table.losing_indices();
    let index = losing[pick_index(losing.len(), rng)];
    Outcome::at((index, &table.entries()[index]))
}

/// Uniform index in `0..len` from a single unit draw.
pub(crate) fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    let scaled = (rng.gen::<f64>() * len as f64) as usize;
    scaled.min(len.saturating_sub(1))
}
