//! Static geometry tables and small geometric helpers.

use glam::dvec2;

use crate::types::Point;

/// Maps a callout level to its height above the axis.
///
/// Levels `0..=11` stack callouts 15px apart starting at 20px; `-1` and `99`
/// both sit on the axis.
#[derive(Debug)]
pub struct YieldHeightTable {
    entries: &'static [(i32, f64)],
}

/// Process-wide read-only table, passed by reference into the solver.
pub static YIELD_HEIGHTS: YieldHeightTable = YieldHeightTable {
    entries: &[
        (-1, 0.0),
        (0, 20.0),
        (1, 35.0),
        (2, 50.0),
        (3, 65.0),
        (4, 80.0),
        (5, 95.0),
        (6, 110.0),
        (7, 125.0),
        (8, 140.0),
        (9, 155.0),
        (10, 170.0),
        (11, 185.0),
        (99, 0.0),
    ],
};

impl YieldHeightTable {
    /// Height for `level`, or `None` when the level is not in the table.
    pub fn height(&self, level: i32) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, h)| *h)
    }
}

/// Triangle with its tip at `tip`, pointing along `direction`.
///
/// Returns `[tip, left base corner, right base corner]`, or `None` for a
/// zero-length direction.
pub fn arrowhead(tip: Point, direction: Point, length: f64, half_width: f64) -> Option<[Point; 3]> {
    let len = direction.length();
    if len < 0.001 {
        return None;
    }
    let unit = direction / len;
    let perp = dvec2(-unit.y, unit.x);
    let base = tip - unit * length;
    Some([tip, base + perp * half_width, base - perp * half_width])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_heights() {
        assert_eq!(YIELD_HEIGHTS.height(-1), Some(0.0));
        assert_eq!(YIELD_HEIGHTS.height(0), Some(20.0));
        assert_eq!(YIELD_HEIGHTS.height(2), Some(50.0));
        assert_eq!(YIELD_HEIGHTS.height(11), Some(185.0));
        assert_eq!(YIELD_HEIGHTS.height(99), Some(0.0));
        assert_eq!(YIELD_HEIGHTS.height(12), None);
    }

    #[test]
    fn test_yield_heights_increase_with_level() {
        let heights: Vec<f64> = (0..=11).filter_map(|l| YIELD_HEIGHTS.height(l)).collect();
        assert_eq!(heights.len(), 12);
        assert!(heights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_arrowhead_pointing_down() {
        let [tip, a, b] = arrowhead(dvec2(10.0, -14.0), dvec2(0.0, 1.0), 8.0, 6.0).unwrap();
        assert_eq!(tip, dvec2(10.0, -14.0));
        assert_eq!(a, dvec2(4.0, -22.0));
        assert_eq!(b, dvec2(16.0, -22.0));
    }

    #[test]
    fn test_arrowhead_zero_direction() {
        assert!(arrowhead(dvec2(0.0, 0.0), dvec2(0.0, 0.0), 8.0, 6.0).is_none());
    }
}
