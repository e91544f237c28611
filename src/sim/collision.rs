//! Collision detection
//!
//! Everything in the game is a box, so a single overlap test covers both
//! heart catches and bomb hits.

use super::entity::Aabb;

/// Axis-aligned bounding box overlap
///
/// Strict comparisons on both axes: boxes that only share an edge do not
/// overlap.
#[inline]
pub fn overlaps(a: Aabb, b: Aabb) -> bool {
    a.right() > b.x && a.x < b.right() && a.bottom() > b.y && a.y < b.bottom()
}
