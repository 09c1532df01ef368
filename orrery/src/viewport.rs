//! Window resize handling

use common::{Camera3D, ResizableSurface, Viewport};

/// Follow a viewport change: the camera's aspect becomes exactly `w / h`
/// and the surface takes the new size. No debouncing and no minimum size.
pub fn apply_resize<S: ResizableSurface>(
    camera: &mut Camera3D,
    surface: &mut S,
    width: u32,
    height: u32,
) -> Viewport {
    let viewport = Viewport::new(width, height);
    camera.update_aspect_ratio(viewport.aspect_ratio());
    surface.resize_surface(viewport);
    log::debug!(
        "Viewport resized to {}x{} (aspect {:.3})",
        width,
        height,
        camera.aspect_ratio
    );
    viewport
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSurface {
        viewport: Viewport,
        configured: u32,
    }

    impl ResizableSurface for FakeSurface {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn resize_surface(&mut self, viewport: Viewport) {
            self.viewport = viewport;
            self.configured += 1;
        }
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut camera = Camera3D::new(16.0 / 9.0);
        let mut surface = FakeSurface {
            viewport: Viewport::new(1280, 720),
            configured: 0,
        };

        let viewport = apply_resize(&mut camera, &mut surface, 1000, 400);

        assert_eq!(camera.aspect_ratio, 1000.0 / 400.0);
        assert_eq!(surface.viewport(), Viewport::new(1000, 400));
        assert_eq!(viewport, surface.viewport());
        assert_eq!(surface.configured, 1);
    }

    #[test]
    fn every_event_is_applied() {
        let mut camera = Camera3D::new(1.0);
        let mut surface = FakeSurface {
            viewport: Viewport::new(1, 1),
            configured: 0,
        };
        for (w, h) in [(640, 480), (640, 480), (3, 7)] {
            apply_resize(&mut camera, &mut surface, w, h);
        }
        assert_eq!(surface.configured, 3);
        assert_eq!(camera.aspect_ratio, 3.0 / 7.0);
    }
}
