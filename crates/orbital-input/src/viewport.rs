//! World-space extents of the visible focal plane.
//!
//! The renderer reports how many world units the viewport spans at the plane
//! the scene is composed on. The satellite maps NDC cursor coordinates into
//! that plane, so the extents must never collapse to zero.

use glam::DVec2;

/// Smallest half extent the engine will accept, in world units.
pub const MIN_HALF_EXTENT: f64 = 1e-4;

/// Half width and half height of the viewport at the focal plane.
///
/// Both values are floored to [`MIN_HALF_EXTENT`] on construction; a
/// non-finite value is treated as degenerate and floored as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportHalfExtents {
    half_width: f64,
    half_height: f64,
}

impl Default for ViewportHalfExtents {
    fn default() -> Self {
        Self::from_perspective(45f64.to_radians(), 16.0 / 9.0, 6.0)
    }
}

fn floor_extent(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_HALF_EXTENT)
    } else {
        MIN_HALF_EXTENT
    }
}

impl ViewportHalfExtents {
    /// Creates extents from raw half width/height, flooring degenerate values.
    #[must_use]
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width: floor_extent(half_width),
            half_height: floor_extent(half_height),
        }
    }

    /// Derives the extents of the plane `distance` units in front of a
    /// perspective camera with vertical field of view `fov_y_radians`.
    #[must_use]
    pub fn from_perspective(fov_y_radians: f64, aspect: f64, distance: f64) -> Self {
        let half_height = (fov_y_radians * 0.5).tan() * distance;
        Self::new(half_height * aspect, half_height)
    }

    /// Half width in world units.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Half height in world units.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Maps an NDC point onto the focal plane.
    #[must_use]
    pub fn ndc_to_plane(&self, ndc: DVec2) -> DVec2 {
        DVec2::new(ndc.x * self.half_width, ndc.y * self.half_height)
    }
}
