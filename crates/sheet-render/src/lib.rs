pub mod hit;
pub mod paint;

pub use hit::{hit_test, hit_test_button, hit_test_rect};
pub use paint::{OverlayTheme, paint_overlay};
