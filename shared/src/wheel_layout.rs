use serde::{Serialize, Deserialize};
use crate::shared_wheel_game::PrizeTable;

/// What a renderer needs to draw one slice. Angles are degrees clockwise from
/// the pointer with the wheel at rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceDefinition {
    pub id: u32,
    pub label: String,
    pub is_win: bool,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
}

pub fn slice_definitions(table: &PrizeTable) -> Vec<SliceDefinition> {
    let step = table.angle_step();
    table
        .entries()
        .iter()
        .enumerate()
        .map(|(index, prize)| {
            let start_angle = index as f64 * step;
            SliceDefinition {
                id: prize.id,
                label: prize.label.clone(),
                is_win: prize.is_win,
                color: prize.color.clone(),
                start_angle,
                end_angle: start_angle + step,
                mid_angle: start_angle + step / 2.0,
            }
        })
        .collect()
}

/// Index of the slice under the fixed pointer when the wheel rests at
/// `rotation` degrees.
pub fn slice_under_pointer(rotation: f64, slice_count: usize) -> usize {
    if slice_count == 0 {
        return 0;
    }
    let step = 360.0 / slice_count as f64;
    let wheel_angle = (360.0 - rotation.rem_euclid(360.0)).rem_euclid(360.0);
    ((wheel_angle / step).floor() as usize).min(slice_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_wheel_game::DEFAULT_PRIZES;

    #[test]
    fn test_slices_cover_full_circle() {
        let slices = slice_definitions(&DEFAULT_PRIZES);
        assert_eq!(slices.len(), 12);
        assert_eq!(slices[0].start_angle, 0.0);
        assert_eq!(slices[0].mid_angle, 15.0);
        assert_eq!(slices[11].end_angle, 360.0);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert!(slices[0].is_win);
        assert_eq!(slices[1].label, "NÃO FOI DESSA VEZ");
    }

    #[test]
    fn test_pointer_lookup() {
        assert_eq!(slice_under_pointer(0.0, 12), 0);
        assert_eq!(slice_under_pointer(345.0, 12), 0);
        assert_eq!(slice_under_pointer(4665.0, 12), 0);
        // 10 degrees of rotation brings the end of the last slice under the pointer
        assert_eq!(slice_under_pointer(10.0, 12), 11);
        assert_eq!(slice_under_pointer(360.0 - 45.0, 12), 1);
    }
}
