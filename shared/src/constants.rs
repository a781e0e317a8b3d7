// Animation timing
pub const SPIN_DURATION_MS: u64 = 5000;
pub const REVEAL_SLACK_MS: u64 = 200; // reveal lands just after the wheel settles
pub const FRAME_INTERVAL_MS: u64 = 16;

// Spin shape
pub const MIN_EXTRA_TURNS: u32 = 10;
pub const MAX_EXTRA_TURNS: u32 = 14;
pub const LANDING_BAND_MIN: f64 = 0.2;
pub const LANDING_BAND_SPAN: f64 = 0.6;

// Rigging defaults
pub const DEFAULT_WIN_PROBABILITY: f64 = 5.0;
pub const DEFAULT_TARGET_PRIZE_ID: u32 = 0;

// Celebration
pub const CONFETTI_PIECES: usize = 80;
pub const CONFETTI_COLORS: [&str; 8] = [
    "#FFD700", "#FFA500", "#FF4500", "#FF1493",
    "#00CED1", "#32CD32", "#1E90FF", "#FFFFFF",
];
