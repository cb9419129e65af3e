use std::cell::Cell;

use canopy_core::*;

use crate::config::HeaderConfig;

/// Header extent for a scroll offset: the part of the reserved space above
/// the content that is still visible, clamped to the header bounds.
pub fn header_extent(bounds: &HeaderConfig, offset_y: f32, safe_top: f32) -> f32 {
    (-offset_y - safe_top).clamp(bounds.collapsed_height, bounds.expanded_height)
}

/// The header drawn over the pages. A render target only: it stores what the
/// coordinator tells it and publishes the resulting frame.
///
/// The frame covers the safe area too, so its bottom edge sits at
/// `extent + safe_top`.
pub struct HeaderSurface {
    bounds: HeaderConfig,
    extent: Cell<f32>,
    safe_top: Cell<f32>,
    width: Cell<f32>,
    frame: Signal<Rect>,
}

impl HeaderSurface {
    pub fn new(bounds: HeaderConfig) -> Self {
        Self {
            bounds,
            extent: Cell::new(bounds.expanded_height),
            safe_top: Cell::new(0.0),
            width: Cell::new(0.0),
            frame: signal(Rect {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: bounds.expanded_height,
            }),
        }
    }

    pub fn bounds(&self) -> &HeaderConfig {
        &self.bounds
    }

    pub fn set_height(&self, height: f32) {
        let height = height.clamp(self.bounds.collapsed_height, self.bounds.expanded_height);
        self.extent.set(height);
        self.publish();
    }

    pub fn set_safe_area_top(&self, top: f32) {
        self.safe_top.set(top);
        self.publish();
    }

    pub fn set_width(&self, width: f32) {
        self.width.set(width);
        self.publish();
    }

    /// Current height, excluding the safe area.
    pub fn extent(&self) -> f32 {
        self.extent.get()
    }

    pub fn is_collapsed(&self) -> bool {
        self.extent.get() <= self.bounds.collapsed_height
    }

    pub fn is_expanded(&self) -> bool {
        self.extent.get() >= self.bounds.expanded_height
    }

    pub fn frame(&self) -> Rect {
        self.frame.get()
    }

    /// Observable frame for renderers.
    pub fn frame_signal(&self) -> &Signal<Rect> {
        &self.frame
    }

    /// Bottom edge of the header, in container coordinates.
    pub fn max_y(&self) -> f32 {
        self.frame.get().max_y()
    }

    /// Frame height as text, for on-screen debugging.
    pub fn debug_label(&self) -> String {
        format!("{:.1}", self.frame.get().h)
    }

    fn publish(&self) {
        self.frame.set_if_changed(Rect {
            x: 0.0,
            y: 0.0,
            w: self.width.get(),
            h: self.extent.get() + self.safe_top.get(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_scenario() {
        let b = HeaderConfig::default();
        assert_eq!(header_extent(&b, -200.0, 20.0), 180.0);
        assert_eq!(header_extent(&b, -100.0, 20.0), 80.0);
        assert_eq!(header_extent(&b, 0.0, 20.0), 44.0);
        // Pulled past rest stays expanded.
        assert_eq!(header_extent(&b, -260.0, 20.0), 180.0);
    }

    #[test]
    fn test_extent_monotonic_in_offset() {
        let b = HeaderConfig::default();
        let top = 47.0;
        let mut prev = f32::INFINITY;
        let mut y = -(b.expanded_height + top);
        while y <= -(b.collapsed_height + top) {
            let h = header_extent(&b, y, top);
            assert!(h <= prev);
            assert!((b.collapsed_height..=b.expanded_height).contains(&h));
            assert_eq!(h, (-y - top).clamp(b.collapsed_height, b.expanded_height));
            prev = h;
            y += 0.5;
        }
    }

    #[test]
    fn test_surface_frame_includes_safe_area() {
        let header = HeaderSurface::new(HeaderConfig::default());
        header.set_width(390.0);
        header.set_safe_area_top(20.0);
        header.set_height(80.0);
        assert_eq!(
            header.frame(),
            Rect {
                x: 0.0,
                y: 0.0,
                w: 390.0,
                h: 100.0
            }
        );
        assert_eq!(header.max_y(), 100.0);
        assert_eq!(header.debug_label(), "100.0");
    }

    #[test]
    fn test_surface_clamps() {
        let header = HeaderSurface::new(HeaderConfig::default());
        header.set_height(10.0);
        assert_eq!(header.extent(), 44.0);
        assert!(header.is_collapsed());
        header.set_height(1000.0);
        assert_eq!(header.extent(), 180.0);
        assert!(header.is_expanded());
    }
}
