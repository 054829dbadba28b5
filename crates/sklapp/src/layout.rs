//! Page geometry and on-screen preview scaling.
//!
//! The certificate is an A4 portrait page. Narrow viewports shrink the page to
//! fit their container; wide ones show it at natural size.

use serde::Serialize;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// A4 width at 96 dpi.
pub const PAGE_WIDTH_PX: f64 = 794.0;
/// Viewports at least this wide show the page unscaled.
pub const BREAKPOINT_PX: f64 = 1024.0;
/// Horizontal space kept free around a scaled page.
pub const GUTTER_PX: f64 = 20.0;
pub const MIN_SCALE: f64 = 0.1;

/// Scale factor for a page shown in a container of `container_px` inside a
/// viewport of `viewport_px`.
pub fn fit_scale(viewport_px: f64, container_px: f64) -> f64 {
    if viewport_px >= BREAKPOINT_PX {
        return 1.0;
    }
    ((container_px - GUTTER_PX) / PAGE_WIDTH_PX).clamp(MIN_SCALE, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledPage {
    pub scale: f64,
}

impl ScaledPage {
    pub fn natural() -> Self {
        Self { scale: 1.0 }
    }

    /// Layout for a container of `width_px` treated as the whole viewport.
    pub fn for_width(width_px: f64) -> Self {
        Self {
            scale: fit_scale(width_px, width_px),
        }
    }

    pub fn is_scaled(&self) -> bool {
        self.scale < 1.0
    }

    /// CSS transform for the page element, `None` at natural size.
    pub fn transform(&self) -> Option<String> {
        self.is_scaled()
            .then(|| format!("scale({:.4})", self.scale))
    }

    /// Height of the box wrapping the scaled page, so content below it does
    /// not leave a gap.
    pub fn wrapper_height_mm(&self) -> f64 {
        PAGE_HEIGHT_MM * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_is_unscaled() {
        assert_eq!(fit_scale(1280.0, 600.0), 1.0);
        assert!(ScaledPage::for_width(1024.0).transform().is_none());
    }

    #[test]
    fn narrow_viewport_fits_container() {
        let scale = fit_scale(414.0, 414.0);
        assert!((scale - (394.0 / 794.0)).abs() < 1e-9);

        let page = ScaledPage::for_width(414.0);
        assert_eq!(page.transform().as_deref(), Some("scale(0.4962)"));
        assert!((page.wrapper_height_mm() - 297.0 * scale).abs() < 1e-9);
    }

    #[test]
    fn never_scales_up() {
        assert_eq!(fit_scale(1000.0, 900.0), 1.0);
    }

    #[test]
    fn tiny_container_has_a_floor() {
        assert_eq!(fit_scale(300.0, 10.0), MIN_SCALE);
    }
}
