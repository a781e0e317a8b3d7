use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::constants::{LANDING_BAND_MIN, LANDING_BAND_SPAN, MAX_EXTRA_TURNS, MIN_EXTRA_TURNS};
use crate::error::WheelError;
use crate::outcome::pick_index;

/// Target angles are kept on a 1/1024 degree grid so that whole turns plus the
/// target add up without rounding, and `final % 360 == target` holds exactly.
const ANGLE_GRID: f64 = 1024.0;

/// Tunables for how a spin travels to its slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    pub min_extra_turns: u32,
    pub max_extra_turns: u32,
    /// Start of the landing band, as a fraction of the slice width.
    pub landing_min: f64,
    /// Width of the landing band, as a fraction of the slice width.
    pub landing_span: f64,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            min_extra_turns: MIN_EXTRA_TURNS,
            max_extra_turns: MAX_EXTRA_TURNS,
            landing_min: LANDING_BAND_MIN,
            landing_span: LANDING_BAND_SPAN,
        }
    }
}

impl RotationParams {
    pub fn validate(&self) -> Result<(), WheelError> {
        if self.min_extra_turns == 0 || self.max_extra_turns < self.min_extra_turns {
            return Err(WheelError::InvalidTurnRange {
                min: self.min_extra_turns,
                max: self.max_extra_turns,
            });
        }
        let band_ok = self.landing_min > 0.0
            && self.landing_span > 0.0
            && self.landing_min + self.landing_span < 1.0;
        if !band_ok {
            return Err(WheelError::InvalidLandingBand {
                min: self.landing_min,
                span: self.landing_span,
            });
        }
        Ok(())
    }
}

/// Everything computed for one spin. `final_rotation` is the new cumulative
/// rotation; the rest is kept for logging and for animating the transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationPlan {
    pub slice_index: usize,
    pub angle_step: f64,
    pub extra_turns: u32,
    pub offset_in_slice: f64,
    pub target_angle: f64,
    pub delta_to_target: f64,
    pub start_rotation: f64,
    pub final_rotation: f64,
}

impl RotationPlan {
    /// Wheel angle at `progress` (0..=1) through the transition.
    pub fn angle_at(&self, progress: f64) -> f64 {
        let travel = self.final_rotation - self.start_rotation;
        self.start_rotation + travel * ease_out(progress)
    }
}

/// Plans a forward spin that leaves the fixed pointer inside `slice_index`.
///
/// The wheel turns clockwise while slice angles are measured from a fixed
/// zero, so the resting angle for a point `a` degrees into the wheel is
/// `360 - a`.
pub fn plan_rotation<R: Rng + ?Sized>(
    slice_index: usize,
    slice_count: usize,
    current_rotation: f64,
    params: &RotationParams,
    rng: &mut R,
) -> Result<RotationPlan, WheelError> {
    if slice_index >= slice_count {
        return Err(WheelError::SliceOutOfRange { index: slice_index, count: slice_count });
    }
    if !current_rotation.is_finite() || current_rotation < 0.0 {
        return Err(WheelError::InvalidRotation(current_rotation));
    }
    params.validate()?;

    let angle_step = 360.0 / slice_count as f64;
    let turn_choices = (params.max_extra_turns - params.min_extra_turns + 1) as usize;
    let extra_turns = params.min_extra_turns + pick_index(turn_choices, rng) as u32;

    let slice_start = slice_index as f64 * angle_step;
    let landing = params.landing_min + rng.gen::<f64>() * params.landing_span;
    let raw_target = 360.0 - (slice_start + landing * angle_step);
    let target_angle = snap(raw_target).rem_euclid(360.0);

    let current_offset = current_rotation.rem_euclid(360.0);
    let base = current_rotation - current_offset;
    let (delta_to_target, wrap) = if target_angle >= current_offset {
        (target_angle - current_offset, 0.0)
    } else {
        (target_angle - current_offset + 360.0, 360.0)
    };
    let final_rotation = base + f64::from(extra_turns) * 360.0 + wrap + target_angle;

    Ok(RotationPlan {
        slice_index,
        angle_step,
        extra_turns,
        offset_in_slice: (360.0 - target_angle - slice_start).rem_euclid(360.0),
        target_angle,
        delta_to_target,
        start_rotation: current_rotation,
        final_rotation,
    })
}

fn snap(angle: f64) -> f64 {
    (angle * ANGLE_GRID).round() / ANGLE_GRID
}

/// Quartic ease-out: fast start, long gentle stop.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Detects slice boundaries passing under the pointer from sampled angles.
#[derive(Debug, Clone)]
pub struct TickTracker {
    angle_step: f64,
    last_slice: Option<i64>,
}

impl TickTracker {
    pub fn new(slice_count: usize) -> Self {
        Self {
            angle_step: 360.0 / slice_count.max(1) as f64,
            last_slice: None,
        }
    }

    /// Records a sample; true when it sits in a different slice band than the
    /// previous one. The first sample only primes the tracker.
    pub fn observe(&mut self, angle: f64) -> bool {
        let slice = (angle / self.angle_step).floor() as i64;
        let crossed = self.last_slice.map_or(false, |last| last != slice);
        self.last_slice = Some(slice);
        crossed
    }

    pub fn reset(&mut self) {
        self.last_slice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rng::ScriptedRng;
    use crate::wheel_layout::slice_under_pointer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_documented_scenario() {
        // turns draw 0.0 -> 10 turns, landing draw 0.5 -> middle of the slice
        let mut rng = ScriptedRng::new(&[0.0, 0.5]);
        let plan = plan_rotation(0, 12, 723.0, &RotationParams::default(), &mut rng).unwrap();

        assert_eq!(plan.angle_step, 30.0);
        assert_eq!(plan.extra_turns, 10);
        assert_eq!(plan.offset_in_slice, 15.0);
        assert_eq!(plan.target_angle, 345.0);
        assert_eq!(plan.delta_to_target, 342.0);
        assert_eq!(plan.final_rotation, 4665.0);
        assert_eq!(plan.final_rotation % 360.0, 345.0);
    }

    #[test]
    fn test_lands_exactly_on_target_for_every_slice() {
        let mut rng = StdRng::seed_from_u64(99);
        let params = RotationParams::default();
        let starts = [0.0, 3.0, 359.5, 723.0, 4665.0, 1_000_000.25, 987_654_321.0];

        for slice in 0..12 {
            for &start in &starts {
                let plan = plan_rotation(slice, 12, start, &params, &mut rng).unwrap();
                assert_eq!(plan.final_rotation.rem_euclid(360.0), plan.target_angle);
                assert!(plan.final_rotation > start);
                assert!(plan.final_rotation - start >= 360.0 * params.min_extra_turns as f64);
                assert!(plan.delta_to_target >= 0.0 && plan.delta_to_target < 360.0);
                assert_eq!(slice_under_pointer(plan.final_rotation, 12), slice);
            }
        }
    }

    #[test]
    fn test_chained_spins_stay_exact_and_monotonic() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = RotationParams::default();
        let mut rotation = 0.0;

        for i in 0..500 {
            let slice = i % 12;
            let plan = plan_rotation(slice, 12, rotation, &params, &mut rng).unwrap();
            assert!(plan.final_rotation > rotation);
            assert_eq!(plan.final_rotation % 360.0, plan.target_angle);
            rotation = plan.final_rotation;
        }
    }

    #[test]
    fn test_landing_stays_in_middle_band() {
        let mut rng = StdRng::seed_from_u64(17);
        let params = RotationParams::default();
        for _ in 0..1000 {
            let plan = plan_rotation(3, 12, 0.0, &params, &mut rng).unwrap();
            let fraction = plan.offset_in_slice / plan.angle_step;
            assert!(fraction >= 0.199 && fraction <= 0.801, "fraction = {}", fraction);
            assert!((10..=14).contains(&plan.extra_turns));
        }
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = RotationParams::default();

        assert_eq!(
            plan_rotation(12, 12, 0.0, &params, &mut rng),
            Err(WheelError::SliceOutOfRange { index: 12, count: 12 })
        );
        assert!(plan_rotation(0, 0, 0.0, &params, &mut rng).is_err());
        assert!(matches!(
            plan_rotation(0, 12, f64::NAN, &params, &mut rng),
            Err(WheelError::InvalidRotation(_))
        ));

        let no_turns = RotationParams { min_extra_turns: 0, ..params };
        assert!(plan_rotation(0, 12, 0.0, &no_turns, &mut rng).is_err());

        let wide_band = RotationParams { landing_min: 0.0, landing_span: 1.0, ..params };
        assert!(plan_rotation(0, 12, 0.0, &wide_band, &mut rng).is_err());
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(2.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn test_angle_at_follows_plan() {
        let mut rng = ScriptedRng::new(&[0.0, 0.5]);
        let plan = plan_rotation(0, 12, 723.0, &RotationParams::default(), &mut rng).unwrap();
        assert_eq!(plan.angle_at(0.0), 723.0);
        assert_eq!(plan.angle_at(1.0), 4665.0);
        assert!(plan.angle_at(0.3) > 723.0 && plan.angle_at(0.3) < 4665.0);
    }

    #[test]
    fn test_tick_tracker_counts_boundaries() {
        let mut ticks = TickTracker::new(12);
        assert!(!ticks.observe(1.0));
        assert!(!ticks.observe(29.0));
        assert!(ticks.observe(30.0));
        assert!(!ticks.observe(45.0));
        assert!(ticks.observe(95.0));

        ticks.reset();
        assert!(!ticks.observe(400.0));
    }
}
