pub mod config;
pub mod handoff;
pub mod model;
pub mod parser;
pub mod view;

pub use config::{FillTarget, SessionConfig};
pub use handoff::{AreaBounds, HandoffRegion, SelectionHandoff};
pub use model::*;
pub use parser::parse_color;
pub use view::{CanvasGeometry, ViewTransform, ZoomBounds, effective_line_width};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Affine, Point, Size, Vec2};
