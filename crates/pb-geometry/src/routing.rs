//! Connection paths.

use pb_core::{Point, Real};
use pb_model::{AnchorPoint, Connection, LegacyAnchor, RoutingMode};

const AXIS_EPS: Real = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Which axis an anchor's edge faces, if any. Corners and the center face
/// neither.
fn edge_axis(anchor_name: &str) -> Option<Axis> {
    let anchor = AnchorPoint::from_name(anchor_name)
        .or_else(|| LegacyAnchor::from_name(anchor_name).map(LegacyAnchor::to_anchor))?;
    match anchor {
        AnchorPoint::MiddleLeft | AnchorPoint::MiddleRight => Some(Axis::Horizontal),
        AnchorPoint::TopCenter | AnchorPoint::BottomCenter => Some(Axis::Vertical),
        _ => None,
    }
}

/// Right-angle route from `start` to `end` as exactly 4 points.
///
/// The first leg runs along the axis the source anchor faces, else the one
/// the target anchor faces, else the longer axis. The bend sits halfway
/// along that first axis.
pub fn route_orthogonal(
    start: Point,
    end: Point,
    source_anchor: &str,
    target_anchor: &str,
) -> Vec<Point> {
    let first = edge_axis(source_anchor)
        .or_else(|| edge_axis(target_anchor))
        .unwrap_or_else(|| {
            if (end.x - start.x).abs() >= (end.y - start.y).abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            }
        });

    match first {
        Axis::Horizontal => {
            let mid_x = (start.x + end.x) / 2.0;
            vec![
                start,
                Point::new(mid_x, start.y),
                Point::new(mid_x, end.y),
                end,
            ]
        }
        Axis::Vertical => {
            let mid_y = (start.y + end.y) / 2.0;
            vec![
                start,
                Point::new(start.x, mid_y),
                Point::new(end.x, mid_y),
                end,
            ]
        }
    }
}

/// Polyline for a connection according to its routing mode.
pub fn connection_path(connection: &Connection) -> Vec<Point> {
    match connection.routing {
        RoutingMode::Straight => vec![connection.start(), connection.end()],
        RoutingMode::Orthogonal => route_orthogonal(
            connection.start(),
            connection.end(),
            &connection.source_anchor,
            &connection.target_anchor,
        ),
    }
}

pub fn is_orthogonal(points: &[Point]) -> bool {
    points.windows(2).all(|w| {
        let dx = (w[0].x - w[1].x).abs();
        let dy = (w[0].y - w[1].y).abs();
        dx <= AXIS_EPS || dy <= AXIS_EPS
    })
}
