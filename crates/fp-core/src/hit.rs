//! Hit testing: point → node lookup.
//!
//! Walks the node list back to front (last painted = topmost) and returns
//! the first node whose measured bounds contain the point. Unmeasured
//! nodes cannot be hit.

use crate::id::NodeId;
use crate::model::Node;
use kurbo::Point;

/// Find the topmost node at canvas position `p`.
/// Returns `None` if the point is over empty canvas.
pub fn hit_test(nodes: &[Node], p: Point) -> Option<NodeId> {
    nodes.iter().rev().find(|n| n.contains(p)).map(|n| n.id)
}
