//! Pan/zoom camera.
//!
//! `screen = world * scale + pan`. Widget positions are stored in world
//! units; the camera is only consulted to place overlays on screen and to
//! normalise measured sizes.

use crate::config::CameraConfig;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// The canvas viewport dimensions, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f32,
    pub pan_y: f32,
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub fn new(pan_x: f32, pan_y: f32, scale: f32) -> Self {
        Self { pan_x, pan_y, scale }
    }

    pub fn world_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.pan_x, y * self.scale + self.pan_y)
    }

    pub fn screen_to_world(&self, sx: f32, sy: f32) -> (f32, f32) {
        ((sx - self.pan_x) / self.scale, (sy - self.pan_y) / self.scale)
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the scale by `factor`, clamped, keeping the world point under
    /// the screen anchor fixed. Returns `true` if the scale changed.
    pub fn zoom_at(&mut self, anchor_x: f32, anchor_y: f32, factor: f32, config: &CameraConfig) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let new_scale = (self.scale * factor).clamp(config.min_scale, config.max_scale);
        if (new_scale - self.scale).abs() <= f32::EPSILON {
            return false;
        }
        let (wx, wy) = self.screen_to_world(anchor_x, anchor_y);
        self.scale = new_scale;
        self.pan_x = anchor_x - wx * new_scale;
        self.pan_y = anchor_y - wy * new_scale;
        true
    }

    /// Fit every rectangle (world units) into the viewport minus padding and
    /// centre on their bounding box. No-op for empty or degenerate input.
    pub fn fit_to(&mut self, rects: &[Rect], viewport: Viewport, config: &CameraConfig) -> bool {
        let Some(content) = Rect::union_all(rects) else {
            return false;
        };
        if content.width <= 0.0 || content.height <= 0.0 {
            return false;
        }
        let available_w = (viewport.width - config.fit_padding * 2.0).max(1.0);
        let available_h = (viewport.height - config.fit_padding * 2.0).max(1.0);
        let scale = (available_w / content.width)
            .min(available_h / content.height)
            .clamp(config.min_scale, config.max_scale);

        let (cx, cy) = content.center();
        self.scale = scale;
        self.pan_x = viewport.width / 2.0 - cx * scale;
        self.pan_y = viewport.height / 2.0 - cy * scale;
        log::debug!("fit {} rects: scale={scale:.3}", rects.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn screen_world_roundtrip() {
        let cam = Camera::new(30.0, -20.0, 2.0);
        let (sx, sy) = cam.world_to_screen(10.0, 5.0);
        assert_eq!((sx, sy), (50.0, -10.0));
        assert_eq!(cam.screen_to_world(sx, sy), (10.0, 5.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let config = CameraConfig::default();
        let mut cam = Camera::default();
        let before = cam.screen_to_world(200.0, 100.0);
        assert!(cam.zoom_at(200.0, 100.0, 2.0, &config));
        let after = cam.screen_to_world(200.0, 100.0);
        assert!(approx(before.0, after.0) && approx(before.1, after.1));
        assert_eq!(cam.scale, 2.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let config = CameraConfig::default();
        let mut cam = Camera::default();
        cam.zoom_at(0.0, 0.0, 100.0, &config);
        assert_eq!(cam.scale, config.max_scale);
        assert!(!cam.zoom_at(0.0, 0.0, 2.0, &config));
        assert!(!cam.zoom_at(0.0, 0.0, -1.0, &config));
    }

    #[test]
    fn fit_centres_content() {
        let config = CameraConfig::default();
        let mut cam = Camera::default();
        let viewport = Viewport {
            width: 880.0,
            height: 680.0,
        };
        let rects = [
            Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 },
            Rect { x: 300.0, y: 200.0, width: 100.0, height: 100.0 },
        ];
        assert!(cam.fit_to(&rects, viewport, &config));
        // Content 400x300 into 800x600 → scale 2.
        assert!(approx(cam.scale, 2.0));
        let (sx, sy) = cam.world_to_screen(200.0, 150.0);
        assert!(approx(sx, 440.0) && approx(sy, 340.0));
    }

    #[test]
    fn fit_ignores_empty_input() {
        let mut cam = Camera::default();
        assert!(!cam.fit_to(&[], Viewport::default(), &CameraConfig::default()));
        assert_eq!(cam, Camera::default());
    }
}
