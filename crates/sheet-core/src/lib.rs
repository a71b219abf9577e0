pub mod attach;
pub mod camera;
pub mod config;
pub mod corners;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod lint;
pub mod model;
pub mod overlay;
pub mod touch;

pub use attach::{AttachOutcome, DetachOutcome, attach_pair, connected_groups, detach_pair, detach_target};
pub use camera::{Camera, Viewport};
pub use config::{CameraConfig, EngineConfig, GroupPolicy, TouchConfig};
pub use corners::{SquareCorners, resolve_corners};
pub use geometry::{MeasuredSizes, Rect, SizeSource, WidgetBounds, layout_fingerprint, sample_bounds};
pub use id::{GroupId, WidgetId};
pub use layout::{Placement, StackMode, auto_stack};
pub use lint::{LintDiagnostic, LintSeverity, lint_sheet};
pub use model::*;
pub use overlay::{AttachButton, ButtonAction, CornerRadii, ShadowShape, attachment_buttons, shadow_shapes};
pub use touch::{Orientation, TouchingEdge, find_touching_edges};
