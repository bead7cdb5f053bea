//! Canvas sizing

use glam::Vec2;

use crate::consts::MIN_PIXEL_RATIO;

/// CSS size of the drawing surface plus the pixel ratio of its backing store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub css_width: f32,
    pub css_height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Build from a container's client size and the device pixel ratio.
    /// Degenerate sizes become 1 px; the ratio is clamped to `[1, cap]`.
    pub fn from_container(client_width: f64, client_height: f64, device_ratio: f64, cap: f32) -> Self {
        let dim = |v: f64| if v.is_finite() { (v as f32).max(1.0) } else { 1.0 };
        let cap = cap.max(MIN_PIXEL_RATIO);
        let ratio = device_ratio as f32;
        let pixel_ratio = if ratio.is_finite() {
            ratio.clamp(MIN_PIXEL_RATIO, cap)
        } else {
            MIN_PIXEL_RATIO
        };
        Self {
            css_width: dim(client_width),
            css_height: dim(client_height),
            pixel_ratio,
        }
    }

    /// Size in CSS pixels, the simulation's coordinate space
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.css_width, self.css_height)
    }

    /// Backing-store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.css_width * self.pixel_ratio).round() as u32,
            (self.css_height * self.pixel_ratio).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_store_scaled_by_ratio() {
        let vp = Viewport::from_container(400.0, 300.0, 1.5, 2.0);
        assert_eq!(vp.size(), Vec2::new(400.0, 300.0));
        assert_eq!(vp.backing_size(), (600, 450));
    }

    #[test]
    fn test_ratio_clamped() {
        assert_eq!(Viewport::from_container(10.0, 10.0, 3.0, 2.0).pixel_ratio, 2.0);
        assert_eq!(Viewport::from_container(10.0, 10.0, 0.5, 2.0).pixel_ratio, 1.0);
        assert_eq!(Viewport::from_container(10.0, 10.0, f64::NAN, 2.0).pixel_ratio, 1.0);
        assert_eq!(Viewport::from_container(10.0, 10.0, 3.0, 1.25).pixel_ratio, 1.25);
    }

    #[test]
    fn test_zero_size_container() {
        let vp = Viewport::from_container(0.0, -5.0, 2.0, 2.0);
        assert_eq!(vp.size(), Vec2::new(1.0, 1.0));
        assert_eq!(vp.backing_size(), (2, 2));
    }
}
