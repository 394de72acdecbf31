//! Alignment snapping for dragged nodes.
//!
//! While a node is dragged, each axis of its proposed top-left corner is
//! compared against alignment lines derived from every other measured node:
//!
//! | # | Line                        | Aligns                                   |
//! |---|-----------------------------|------------------------------------------|
//! | 1 | `o`                         | leading edge ↔ leading edge              |
//! | 2 | `o - m`                     | trailing edge ↔ other's leading edge     |
//! | 3 | `o + os`                    | leading edge ↔ other's trailing edge     |
//! | 4 | `o + os - m`                | trailing edge ↔ trailing edge            |
//! | 5 | `o + os/2 - m/2`            | center ↔ center                          |
//!
//! (`o` = other node's coordinate, `os` = its size, `m` = moving node's size.)
//!
//! A line within `threshold` (strictly) of the proposed coordinate replaces
//! it. When several lines qualify on one axis, the last one evaluated wins:
//! nodes in slice order, then lines in table order.

use crate::id::NodeId;
use crate::model::Node;
use kurbo::Point;

/// Default snap distance in canvas pixels.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Which alignment line each axis snapped to, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapGuides {
    /// Snapped x coordinate (vertical guide).
    pub x: Option<f64>,
    /// Snapped y coordinate (horizontal guide).
    pub y: Option<f64>,
}

impl SnapGuides {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Compute the snapped position for `moving` proposed at `proposed`.
///
/// Returns `proposed` unchanged when the moving node is unknown or has not
/// been measured yet.
pub fn snap(moving: NodeId, proposed: Point, nodes: &[Node], threshold: f64) -> Point {
    snap_with_guides(moving, proposed, nodes, threshold).0
}

/// Like [`snap`], but also reports the guide lines that were hit.
pub fn snap_with_guides(
    moving: NodeId,
    proposed: Point,
    nodes: &[Node],
    threshold: f64,
) -> (Point, SnapGuides) {
    let mut guides = SnapGuides::default();

    let Some(size) = nodes
        .iter()
        .find(|n| n.id == moving)
        .and_then(|n| n.measured)
    else {
        return (proposed, guides);
    };

    for other in nodes {
        if other.id == moving {
            continue;
        }
        let Some(other_size) = other.measured else {
            continue;
        };

        let xs = alignment_lines(other.position.x, other_size.width, size.width);
        if let Some(x) = last_within(&xs, proposed.x, threshold) {
            guides.x = Some(x);
        }

        let ys = alignment_lines(other.position.y, other_size.height, size.height);
        if let Some(y) = last_within(&ys, proposed.y, threshold) {
            guides.y = Some(y);
        }
    }

    let snapped = Point::new(
        guides.x.unwrap_or(proposed.x),
        guides.y.unwrap_or(proposed.y),
    );
    if !guides.is_empty() {
        log::trace!(
            "snap {moving}: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            proposed.x,
            proposed.y,
            snapped.x,
            snapped.y
        );
    }
    (snapped, guides)
}

/// The five candidate lines on one axis.
fn alignment_lines(other: f64, other_size: f64, moving_size: f64) -> [f64; 5] {
    [
        other,
        other - moving_size,
        other + other_size,
        other + other_size - moving_size,
        other + other_size / 2.0 - moving_size / 2.0,
    ]
}

fn last_within(lines: &[f64], value: f64, threshold: f64) -> Option<f64> {
    lines
        .iter()
        .rev()
        .copied()
        .find(|line| (line - value).abs() < threshold)
}
