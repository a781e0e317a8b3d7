use serde::{Serialize, Deserialize};
use strum::{Display, EnumString};
use once_cell::sync::Lazy;
use crate::constants::{DEFAULT_TARGET_PRIZE_ID, DEFAULT_WIN_PROBABILITY};
use crate::error::WheelError;

/// A single prize on the wheel. Its position in the table is its slice.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrizeEntry {
    pub id: u32,
    pub label: String,
    pub is_win: bool,
    pub color: String,
    pub reward_amount: Option<u32>,
}

impl PrizeEntry {
    pub fn win(id: u32, label: &str, color: &str, reward_amount: u32) -> Self {
        Self {
            id,
            label: label.to_string(),
            is_win: true,
            color: color.to_string(),
            reward_amount: Some(reward_amount),
        }
    }

    pub fn lose(id: u32, label: &str, color: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            is_win: false,
            color: color.to_string(),
            reward_amount: None,
        }
    }
}

/// Ordered, validated list of prizes. Always holds at least one winning and
/// one losing entry, and ids are unique.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(try_from = "Vec<PrizeEntry>", into = "Vec<PrizeEntry>")]
pub struct PrizeTable {
    entries: Vec<PrizeEntry>,
    winning: Vec<usize>,
    losing: Vec<usize>,
}

impl PrizeTable {
    pub fn new(entries: Vec<PrizeEntry>) -> Result<Self, WheelError> {
        if entries.is_empty() {
            return Err(WheelError::EmptyTable);
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|other| other.id == entry.id) {
                return Err(WheelError::DuplicatePrizeId(entry.id));
            }
        }

        let (winning, losing): (Vec<usize>, Vec<usize>) =
            (0..entries.len()).partition(|&i| entries[i].is_win);

        if losing.is_empty() {
            return Err(WheelError::NoLosingEntry);
        }
        if winning.is_empty() {
            return Err(WheelError::NoWinningEntry);
        }

        Ok(Self { entries, winning, losing })
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a constructed table; kept for the usual `len` pairing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PrizeEntry> {
        self.entries.get(index)
    }

    /// Width of one slice in degrees.
    pub fn angle_step(&self) -> f64 {
        360.0 / self.entries.len() as f64
    }

    /// Looks up an entry by id, returning its slice index alongside it.
    pub fn find(&self, id: u32) -> Option<(usize, &PrizeEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.id == id)
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.find(id).is_some()
    }

    /// Slice indices of winning entries, in table order.
    pub fn winning_indices(&self) -> &[usize] {
        &self.winning
    }

    /// Slice indices of losing entries, in table order.
    pub fn losing_indices(&self) -> &[usize] {
        &self.losing
    }

    pub fn winners(&self) -> impl Iterator<Item = &PrizeEntry> {
        self.winning.iter().map(move |&i| &self.entries[i])
    }

    pub fn first_winner(&self) -> (usize, &PrizeEntry) {
        let index = self.winning[0];
        (index, &self.entries[index])
    }

    pub fn first_loser(&self) -> (usize, &PrizeEntry) {
        let index = self.losing[0];
        (index, &self.entries[index])
    }
}

impl TryFrom<Vec<PrizeEntry>> for PrizeTable {
    type Error = WheelError;

    fn try_from(entries: Vec<PrizeEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<PrizeTable> for Vec<PrizeEntry> {
    fn from(table: PrizeTable) -> Self {
        table.entries
    }
}

const LOSE_LABEL: &str = "NÃO FOI DESSA VEZ";
const LOSE_COLOR: &str = "#334155";
const GOLD: &str = "#FACC15";
const DARK_GOLD: &str = "#EAB308";

/// The stock twelve-slice wheel: winners on even ids, losers on odd ids.
pub static DEFAULT_PRIZES: Lazy<PrizeTable> = Lazy::new(|| {
    PrizeTable::new(vec![
        PrizeEntry::win(0, "R$ 10.000", GOLD, 10_000),
        PrizeEntry::lose(1, LOSE_LABEL, LOSE_COLOR),
        PrizeEntry::win(2, "R$ 500", DARK_GOLD, 500),
        PrizeEntry::lose(3, LOSE_LABEL, LOSE_COLOR),
        PrizeEntry::win(4, "R$ 5.000", GOLD, 5_000),
        PrizeEntry::lose(5, LOSE_LABEL, LOSE_COLOR),
        PrizeEntry::win(6, "R$ 100", DARK_GOLD, 100),
        PrizeEntry::lose(7, LOSE_LABEL, LOSE_COLOR),
        PrizeEntry::win(8, "R$ 1.000", GOLD, 1_000),
        PrizeEntry::lose(9, LOSE_LABEL, LOSE_COLOR),
        PrizeEntry::win(10, "R$ 50", DARK_GOLD, 50),
        PrizeEntry::lose(11, LOSE_LABEL, LOSE_COLOR),
    ])
    .expect("default prize table is valid")
});

/// How the next spin's outcome is decided.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum RigMode {
    #[default]
    #[strum(to_string = "ALWAYS_LOSE", serialize = "always-lose", serialize = "lose")]
    AlwaysLose,
    #[strum(to_string = "PROBABILITY", serialize = "probability", serialize = "chance")]
    Probability,
    #[strum(to_string = "FORCE_SPECIFIC", serialize = "force-specific", serialize = "force")]
    ForceSpecific,
}

/// Operator-controlled rigging. Read once per spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RigConfiguration {
    pub mode: RigMode,
    pub win_probability_percent: f64,
    pub target_prize_id: u32,
}

impl Default for RigConfiguration {
    fn default() -> Self {
        Self {
            mode: RigMode::AlwaysLose,
            win_probability_percent: DEFAULT_WIN_PROBABILITY,
            target_prize_id: DEFAULT_TARGET_PRIZE_ID,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Result,
}

/// Live state of the wheel.
///
/// The selected outcome is held back while spinning and only becomes
/// `last_selected` once the spin is revealed.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SpinState {
    pub phase: SpinPhase,
    pub cumulative_rotation: f64,
    pub last_selected: Option<PrizeEntry>,
    pub spin_id: u64,
    #[serde(skip)]
    pending: Option<PrizeEntry>,
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Enters `Spinning` towards `final_rotation`. Returns the new spin id, or
    /// `None` when a spin is already running or the rotation would not move
    /// the wheel forward.
    pub fn start_spin(&mut self, outcome: PrizeEntry, final_rotation: f64) -> Option<u64> {
        if self.is_spinning() {
            log::debug!("spin request ignored, spin {} still running", self.spin_id);
            return None;
        }
        if !(final_rotation > self.cumulative_rotation) {
            log::warn!(
                "refusing backwards rotation {} -> {}",
                self.cumulative_rotation,
                final_rotation
            );
            return None;
        }

        self.spin_id += 1;
        self.phase = SpinPhase::Spinning;
        self.cumulative_rotation = final_rotation;
        self.last_selected = None;
        self.pending = Some(outcome);
        Some(self.spin_id)
    }

    /// Moves `Spinning -> Result` for the matching spin and exposes its outcome.
    pub fn complete_spin(&mut self, spin_id: u64) -> Option<&PrizeEntry> {
        if !self.is_spinning() || spin_id != self.spin_id {
            log::debug!("stale reveal for spin {} (current {})", spin_id, self.spin_id);
            return None;
        }

        self.phase = SpinPhase::Result;
        self.last_selected = self.pending.take();
        self.last_selected.as_ref()
    }

    /// `Result -> Idle`. No-op in any other phase.
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != SpinPhase::Result {
            return false;
        }
        self.phase = SpinPhase::Idle;
        self.last_selected = None;
        true
    }
}
