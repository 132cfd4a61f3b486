//! Headless position preview.
//!
//! Mounts the read-only position map the way the page does for one
//! `"lat,lng[,heading]"` value and reports what it would show.

use marsgeo_core::config::{MapOptions, PositionViewConfig};
use marsgeo_fence::position::PositionView;
use marsgeo_fence::{MarkerKind, MemoryOverlay};
use serde::Serialize;

/// What the mounted view shows.
#[derive(Debug, Serialize)]
pub struct Preview {
    pub overlay: MemoryOverlay,
    pub options: MapOptions,
}

/// Mounts a view for `text` at the configured zoom.
///
/// The preview map has every interaction off; `zoom_control` mirrors the
/// page's `data-zoom` attribute.
pub fn mount(
    text: &str,
    kind: MarkerKind,
    config: &PositionViewConfig,
    zoom_control: bool,
) -> marsgeo_fence::Result<Preview> {
    let text = text.to_string();
    let view = PositionView::mount(move || text.clone(), MemoryOverlay::default(), kind, config.zoom)?;

    Ok(Preview {
        overlay: view.view().clone(),
        options: MapOptions::static_preview(zoom_control),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use marsgeo_fence::marker::MarkerRender;
    use marsgeo_geo::{to_gcj02, Wgs84Point};

    #[test]
    fn test_mount_uses_configured_zoom() {
        let config = PositionViewConfig { zoom: 17 };
        let preview = mount("31.2304,121.4737,90", MarkerKind::Arrow, &config, false).unwrap();

        let shown = to_gcj02(Wgs84Point::new(121.4737, 31.2304));
        assert_eq!(preview.overlay.zoom, 17);
        assert_eq!(preview.overlay.view_center, Some(shown));
        assert!(matches!(
            preview.overlay.rendered_marker,
            Some(MarkerRender::Arrow { rotation_deg, .. }) if rotation_deg == 90.0
        ));
        assert!(!preview.options.dragging);
        assert!(!preview.options.zoom_control);
    }

    #[test]
    fn test_mount_default_zoom_and_zoom_control() {
        let preview = mount("39.9042,116.4074", MarkerKind::Plain, &PositionViewConfig::default(), true).unwrap();

        assert_eq!(preview.overlay.zoom, 15);
        assert!(preview.options.zoom_control);
        assert!(matches!(preview.overlay.rendered_marker, Some(MarkerRender::Icon { .. })));
    }

    #[test]
    fn test_mount_rejects_bad_text() {
        assert!(mount("somewhere", MarkerKind::Plain, &PositionViewConfig::default(), false).is_err());
    }
}
