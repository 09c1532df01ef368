//! Logical viewport size and the surfaces that follow it

use winit::dpi::PhysicalSize;

/// Size of the output surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, unguarded. A zero height yields an infinite or NaN ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Whether a GPU surface can be configured at this size.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Anything that renders into a surface sized by the viewport.
pub trait ResizableSurface {
    /// Current surface dimensions.
    fn viewport(&self) -> Viewport;

    /// Resize the output surface to `viewport`.
    fn resize_surface(&mut self, viewport: Viewport);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert_eq!(Viewport::new(1280, 720).aspect_ratio(), 1280.0 / 720.0);
        assert_eq!(Viewport::new(500, 1000).aspect_ratio(), 0.5);
    }

    #[test]
    fn zero_sized_viewport_has_no_area() {
        assert!(!Viewport::new(0, 720).has_area());
        assert!(!Viewport::new(1280, 0).has_area());
        assert!(Viewport::new(1, 1).has_area());
    }

    #[test]
    fn converts_from_physical_size() {
        let viewport: Viewport = PhysicalSize::new(800u32, 600u32).into();
        assert_eq!(viewport, Viewport::new(800, 600));
    }
}
