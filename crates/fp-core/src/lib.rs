pub mod hit;
pub mod id;
pub mod model;
pub mod snap;

pub use hit::hit_test;
pub use id::NodeId;
pub use model::*;
pub use snap::{SNAP_THRESHOLD, SnapGuides, snap, snap_with_guides};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Affine, Point, Rect, Size, Vec2};
