use std::io::{IsTerminal, Write};
use std::str::FromStr;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::celebration::{confetti_burst, ConfettiShape};
use shared::constants::CONFETTI_PIECES;
use shared::wheel_layout::slice_under_pointer;
use shared::SpinPhase;
use strum::EnumString;
use crate::admin::AdminCommand;
use crate::effects::{AudioError, AudioFeedback, CelebrationEffects, Collaborators, WheelRenderer, WheelView};
use crate::error::SpinnerError;

pub const HELP: &str = "\
commands:
  spin | s | <enter>   spin the wheel
  ok | ack             dismiss the result
  status               show the wheel state
  admin mode <always_lose|probability|force_specific>
  admin chance <0-100>%
  admin target <prize id>
  admin show           print the current rigging
  help                 this text
  quit | q             leave";

/// Draws the wheel as text on stdout.
pub struct ConsoleRenderer;

impl WheelRenderer for ConsoleRenderer {
    fn render(&mut self, view: &WheelView<'_>) {
        match view.phase {
            SpinPhase::Spinning => println!("🎡 spinning..."),
            SpinPhase::Result => {
                let Some(prize) = view.result else { return };
                let under_pointer = slice_under_pointer(view.current_rotation, view.slices.len());
                let pointer_label = view
                    .slices
                    .get(under_pointer)
                    .map(|slice| slice.label.as_str())
                    .unwrap_or(prize.label.as_str());
                if prize.is_win {
                    println!("🏆 {} (pointer on {})", prize.label, pointer_label);
                } else {
                    println!("😞 {} (pointer on {})", prize.label, pointer_label);
                }
                println!("type `ok` to continue or `spin` to go again");
            }
            SpinPhase::Idle => println!("wheel ready, {} slices", view.slices.len()),
        }
    }
}

/// Prints a short confetti summary for winning reveals.
pub struct ConsoleCelebration {
    rng: StdRng,
}

impl ConsoleCelebration {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl CelebrationEffects for ConsoleCelebration {
    fn celebrate(&mut self, is_winning: bool) {
        if !is_winning {
            return;
        }
        let burst = confetti_burst(CONFETTI_PIECES, &mut self.rng);
        let round = burst.iter().filter(|p| p.shape == ConfettiShape::Round).count();
        let longest = burst
            .iter()
            .map(|p| p.delay_secs + p.duration_secs)
            .fold(0.0, f64::max);
        println!(
            "🎊 {} pieces of confetti ({} round, {} square) for {:.1}s",
            burst.len(),
            round,
            burst.len() - round,
            longest
        );
    }
}

/// Terminal bell cues. Refuses to play when stdout is not a terminal.
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self { enabled: std::io::stdout().is_terminal() }
    }

    fn emit(&self, cue: &str) -> Result<(), AudioError> {
        if !self.enabled {
            return Err(AudioError::Unavailable);
        }
        let mut out = std::io::stdout();
        out.write_all(cue.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| AudioError::Playback(e.to_string()))
    }
}

impl AudioFeedback for TerminalBell {
    fn play_outcome(&mut self, outcome_is_win: bool) -> Result<(), AudioError> {
        if outcome_is_win {
            self.emit("\x07\x07")
        } else {
            self.emit("\x07")
        }
    }

    fn play_tick(&mut self) -> Result<(), AudioError> {
        self.emit("·")
    }
}

pub fn collaborators(seed: Option<u64>) -> Collaborators {
    Collaborators {
        renderer: Box::new(ConsoleRenderer),
        celebration: Box::new(ConsoleCelebration::new(seed)),
        audio: Box::new(TerminalBell::new()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Verb {
    #[strum(serialize = "spin", serialize = "s")]
    Spin,
    #[strum(serialize = "ok", serialize = "ack")]
    Acknowledge,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "admin")]
    Admin,
    #[strum(serialize = "help", serialize = "?")]
    Help,
    #[strum(serialize = "quit", serialize = "q", serialize = "exit")]
    Quit,
}

/// One line of operator input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Spin,
    Acknowledge,
    Status,
    Admin(AdminCommand),
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = SpinnerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ConsoleCommand::Spin);
        }

        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let verb = Verb::from_str(head).map_err(|_| SpinnerError::UnknownCommand(head.to_string()))?;

        match (verb, rest.trim().is_empty()) {
            (Verb::Admin, _) => rest.parse().map(ConsoleCommand::Admin),
            (_, false) => Err(SpinnerError::UnknownCommand(line.to_string())),
            (Verb::Spin, true) => Ok(ConsoleCommand::Spin),
            (Verb::Acknowledge, true) => Ok(ConsoleCommand::Acknowledge),
            (Verb::Status, true) => Ok(ConsoleCommand::Status),
            (Verb::Help, true) => Ok(ConsoleCommand::Help),
            (Verb::Quit, true) => Ok(ConsoleCommand::Quit),
        }
    }
}
