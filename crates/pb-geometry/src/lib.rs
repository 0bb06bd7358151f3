//! pb-geometry: canvas geometry for plantboard diagrams.
//!
//! Contains:
//! - anchor (anchor offsets and connection endpoint resolution)
//! - snap (grid settings and anchor-aware snapping)
//! - routing (straight and orthogonal connection paths)
//! - containment (group membership and group bounds)
//!
//! Every function is pure: inputs are borrowed and results are returned,
//! callers decide where to write them back.

pub mod anchor;
pub mod containment;
pub mod routing;
pub mod snap;

pub use anchor::{
    anchor_offset, anchor_position, border_intersection, resolve_connection_endpoint,
    update_connection_endpoints,
};
pub use containment::{GroupPadding, group_bounds, is_contained, membership, refresh_memberships};
pub use routing::{connection_path, is_orthogonal, route_orthogonal};
pub use snap::{GridSettings, snap_anchor_to_grid, snap_to_grid, snap_value};
