use rand::Rng;
use serde::Serialize;
use crate::constants::CONFETTI_COLORS;
use crate::outcome::pick_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfettiShape {
    Square,
    Round,
}

/// One falling piece of a win burst. Distances are in pixels, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfettiPiece {
    pub id: usize,
    pub left_percent: f64,
    pub color: &'static str,
    pub delay_secs: f64,
    pub duration_secs: f64,
    pub size: f64,
    pub width_ratio: f64,
    pub sway: f64,
    pub sway_duration_secs: f64,
    pub shape: ConfettiShape,
}

/// Lays out a burst of `count` pieces. Short delays so the burst starts at
/// once; varied fall durations give it depth.
pub fn confetti_burst<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|id| ConfettiPiece {
            id,
            left_percent: rng.gen::<f64>() * 100.0,
            color: CONFETTI_COLORS[pick_index(CONFETTI_COLORS.len(), rng)],
            delay_secs: rng.gen::<f64>() * 0.5,
            duration_secs: 2.5 + rng.gen::<f64>() * 2.0,
            size: 6.0 + rng.gen::<f64>() * 8.0,
            width_ratio: 0.6 + rng.gen::<f64>() * 0.8,
            sway: 20.0 + rng.gen::<f64>() * 40.0,
            sway_duration_secs: 1.0 + rng.gen::<f64>() * 2.0,
            shape: if rng.gen::<f64>() > 0.5 { ConfettiShape::Round } else { ConfettiShape::Square },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CONFETTI_PIECES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_burst_ranges() {
        let mut rng = StdRng::seed_from_u64(8);
        let burst = confetti_burst(CONFETTI_PIECES, &mut rng);

        assert_eq!(burst.len(), 80);
        for (i, piece) in burst.iter().enumerate() {
            assert_eq!(piece.id, i);
            assert!((0.0..100.0).contains(&piece.left_percent));
            assert!((0.0..0.5).contains(&piece.delay_secs));
            assert!((2.5..4.5).contains(&piece.duration_secs));
            assert!((6.0..14.0).contains(&piece.size));
            assert!((20.0..60.0).contains(&piece.sway));
            assert!(CONFETTI_COLORS.contains(&piece.color));
        }
    }
}
