//! Anchor offsets and connection endpoint resolution.

use pb_core::{Point, Real, Rect};
use pb_model::{AnchorPoint, Connection, Equipment, LegacyAnchor};

const DEGENERATE: Real = 0.001;

/// Offset of `anchor` from the top-left corner of `rect`.
pub fn anchor_offset(rect: Rect, anchor: AnchorPoint) -> Point {
    let (fx, fy) = anchor.fractions();
    Point::new(rect.width * fx, rect.height * fy)
}

pub fn anchor_position(rect: Rect, anchor: AnchorPoint) -> Point {
    rect.origin() + anchor_offset(rect, anchor)
}

/// Where the ray from the center of `rect` towards `towards` leaves the
/// rectangle. Returns the center when both points coincide.
pub fn border_intersection(rect: Rect, towards: Point) -> Point {
    let center = rect.center();
    let dx = towards.x - center.x;
    let dy = towards.y - center.y;

    if dx.abs() < DEGENERATE && dy.abs() < DEGENERATE {
        return center;
    }

    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let scale_x = if dx.abs() > DEGENERATE {
        half_w / dx.abs()
    } else {
        Real::MAX
    };
    let scale_y = if dy.abs() > DEGENERATE {
        half_h / dy.abs()
    } else {
        Real::MAX
    };
    let scale = scale_x.min(scale_y);

    Point::new(center.x + dx * scale, center.y + dy * scale)
}

/// Absolute endpoint for a connection attached to `rect` at `anchor_name`.
///
/// Named 9-point anchors resolve to their position, the legacy edge names
/// to the matching edge midpoint, and anything else to the border point
/// facing `towards`.
pub fn resolve_connection_endpoint(rect: Rect, anchor_name: &str, towards: Point) -> Point {
    if let Some(anchor) = AnchorPoint::from_name(anchor_name) {
        return anchor_position(rect, anchor);
    }
    if let Some(legacy) = LegacyAnchor::from_name(anchor_name) {
        return anchor_position(rect, legacy.to_anchor());
    }
    border_intersection(rect, towards)
}

/// Recompute the derived endpoints of `connection` from its two equipment.
pub fn update_connection_endpoints(
    connection: &mut Connection,
    source: &Equipment,
    target: &Equipment,
) {
    let source_rect = source.rect();
    let target_rect = target.rect();
    let start = resolve_connection_endpoint(
        source_rect,
        &connection.source_anchor,
        target_rect.center(),
    );
    let end = resolve_connection_endpoint(
        target_rect,
        &connection.target_anchor,
        source_rect.center(),
    );
    connection.set_endpoints(start, end);
}
