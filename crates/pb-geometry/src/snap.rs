//! Grid snapping.
//!
//! Rounding is half-to-even: a coordinate exactly between two grid lines
//! goes to the line with the even index (10 on a 20 grid snaps to 0, 30
//! snaps to 40).

use pb_core::{PbError, PbResult, Point, Real, ensure_finite};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_SIZE: Real = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    size: Real,
    pub enabled: bool,
}

impl GridSettings {
    /// Enabled grid with spacing `size`. Spacing must be finite and at least 1.
    pub fn new(size: Real) -> PbResult<Self> {
        let size = ensure_finite(size, "grid size")?;
        if size < 1.0 {
            return Err(PbError::InvalidArg {
                what: "grid size must be at least 1",
            });
        }
        Ok(Self {
            size,
            enabled: true,
        })
    }

    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    pub fn size(&self) -> Real {
        self.size
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            enabled: true,
        }
    }
}

/// Nearest grid line to `value`.
pub fn snap_value(value: Real, size: Real) -> Real {
    (value / size).round_ties_even() * size
}

pub fn snap_to_grid(point: Point, grid: &GridSettings) -> Point {
    if !grid.enabled {
        return point;
    }
    Point::new(snap_value(point.x, grid.size), snap_value(point.y, grid.size))
}

/// Snap the anchor at `top_left + offset` and return the matching top-left.
pub fn snap_anchor_to_grid(top_left: Point, offset: Point, grid: &GridSettings) -> Point {
    if !grid.enabled {
        return top_left;
    }
    let anchor = snap_to_grid(top_left + offset, grid);
    anchor - offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSettings {
        GridSettings::new(20.0).unwrap()
    }

    #[test]
    fn snaps_to_nearest_even_line() {
        let cases = [
            ((0.0, 0.0), (0.0, 0.0)),
            ((15.0, 15.0), (20.0, 20.0)),
            ((25.0, 35.0), (20.0, 40.0)),
            ((10.0, 10.0), (0.0, 0.0)),
            ((5.0, 5.0), (0.0, 0.0)),
            ((30.0, 30.0), (40.0, 40.0)),
        ];
        for ((x, y), (ex, ey)) in cases {
            assert_eq!(
                snap_to_grid(Point::new(x, y), &grid()),
                Point::new(ex, ey),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn disabled_is_identity() {
        let g = grid().disabled();
        let p = Point::new(15.0, 15.0);
        assert_eq!(snap_to_grid(p, &g), p);
        assert_eq!(snap_anchor_to_grid(p, Point::new(25.0, 25.0), &g), p);
    }

    #[test]
    fn anchor_snap_back_derives_top_left() {
        let p = snap_anchor_to_grid(Point::new(10.0, 10.0), Point::new(25.0, 25.0), &grid());
        assert_eq!(p, Point::new(15.0, 15.0));
    }

    #[test]
    fn rejects_small_or_non_finite_sizes() {
        assert!(GridSettings::new(0.5).is_err());
        assert!(GridSettings::new(0.0).is_err());
        assert!(matches!(
            GridSettings::new(Real::NAN),
            Err(PbError::NonFinite { what: "grid size", .. })
        ));
        assert!(GridSettings::new(Real::INFINITY).is_err());
        assert_eq!(GridSettings::new(1.0).unwrap().size(), 1.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn snapped_points_are_on_grid(
                x in -10_000.0f64..10_000.0,
                y in -10_000.0f64..10_000.0,
                size in 1u32..100,
            ) {
                let g = GridSettings::new(size as f64).unwrap();
                let p = snap_to_grid(Point::new(x, y), &g);
                prop_assert!((p.x / g.size()).fract().abs() < 1e-9);
                prop_assert!((p.y / g.size()).fract().abs() < 1e-9);
                prop_assert!((p.x - x).abs() <= g.size() / 2.0 + 1e-9);
                prop_assert!((p.y - y).abs() <= g.size() / 2.0 + 1e-9);
            }

            #[test]
            fn snapping_is_idempotent(x in -1_000.0f64..1_000.0, y in -1_000.0f64..1_000.0) {
                let g = GridSettings::default();
                let once = snap_to_grid(Point::new(x, y), &g);
                prop_assert_eq!(snap_to_grid(once, &g), once);
            }
        }
    }
}
