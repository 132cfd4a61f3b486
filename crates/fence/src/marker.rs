//! Position markers.
//!
//! A marker is either a plain pin icon or a heading arrow. The variant is
//! picked once when the marker is built; after that callers only talk to the
//! [`RotatableMarker`] capability and never branch on the kind.

use marsgeo_geo::Gcj02Point;
use serde::{Deserialize, Serialize};

use crate::record::parse_number;

/// Compass bearing in degrees clockwise from north, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub Option<f64>);

impl Heading {
    /// No rotation.
    pub const NONE: Heading = Heading(None);

    /// Parses heading text. Empty or unparseable text means no heading.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::NONE;
        }
        Heading(parse_number("heading", text).ok())
    }

    /// Bearing in degrees, if any.
    pub fn degrees(&self) -> Option<f64> {
        self.0
    }
}

/// Which marker variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Pin icon
    #[default]
    Plain,
    /// Dot, or arrow when a heading is known
    Arrow,
}

impl MarkerKind {
    /// Reads the kind from the page's `data-marker` attribute.
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            Some("arrow") => MarkerKind::Arrow,
            _ => MarkerKind::Plain,
        }
    }
}

/// Icon image description for the pin marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconStyle {
    pub icon_url: &'static str,
    pub shadow_url: &'static str,
    pub icon_size: (u32, u32),
    pub icon_anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
    pub shadow_size: (u32, u32),
}

/// The pin icon served next to the page assets.
pub const DEFAULT_ICON: IconStyle = IconStyle {
    icon_url: "/marker-icon.png",
    shadow_url: "/marker-shadow.png",
    icon_size: (25, 41),
    icon_anchor: (12, 41),
    popup_anchor: (1, -34),
    shadow_size: (41, 41),
};

/// SVG path of the heading arrow, pointing north before rotation.
pub const ARROW_PATH: &str = "M0,3 L-4,5 L0,-5 L4,5 z";

/// Radius of the dot drawn when no heading is known, in pixels.
pub const DOT_RADIUS_PX: f64 = 5.0;

/// What the map layer should draw for a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MarkerRender {
    /// Pin image anchored at the point
    Icon { at: Gcj02Point, icon: IconStyle },
    /// Filled circle
    Dot {
        at: Gcj02Point,
        radius_px: f64,
        fill_opacity: f64,
    },
    /// Arrow path translated to the point and rotated by the heading
    Arrow {
        at: Gcj02Point,
        rotation_deg: f64,
        path: &'static str,
        fill_opacity: f64,
    },
}

impl MarkerRender {
    /// Anchor point of the drawing.
    pub fn at(&self) -> Gcj02Point {
        match self {
            MarkerRender::Icon { at, .. }
            | MarkerRender::Dot { at, .. }
            | MarkerRender::Arrow { at, .. } => *at,
        }
    }
}

/// A marker that can be moved, turned and drawn.
pub trait RotatableMarker {
    /// Moves the marker.
    fn set_position(&mut self, at: Gcj02Point);
    /// Turns the marker. Variants without a direction ignore this.
    fn set_heading(&mut self, heading: Heading);
    /// Current position.
    fn position(&self) -> Gcj02Point;
    /// Drawing instructions for the current state.
    fn render(&self) -> MarkerRender;
}

/// Pin marker; has no direction.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainMarker {
    at: Gcj02Point,
    icon: IconStyle,
}

impl PlainMarker {
    pub fn new(at: Gcj02Point) -> Self {
        Self { at, icon: DEFAULT_ICON }
    }
}

impl RotatableMarker for PlainMarker {
    fn set_position(&mut self, at: Gcj02Point) {
        self.at = at;
    }

    fn set_heading(&mut self, _heading: Heading) {}

    fn position(&self) -> Gcj02Point {
        self.at
    }

    fn render(&self) -> MarkerRender {
        MarkerRender::Icon {
            at: self.at,
            icon: self.icon,
        }
    }
}

/// Heading arrow; falls back to a dot while the heading is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalMarker {
    at: Gcj02Point,
    heading: Heading,
}

impl DirectionalMarker {
    pub fn new(at: Gcj02Point, heading: Heading) -> Self {
        Self { at, heading }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }
}

impl RotatableMarker for DirectionalMarker {
    fn set_position(&mut self, at: Gcj02Point) {
        self.at = at;
    }

    fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    fn position(&self) -> Gcj02Point {
        self.at
    }

    fn render(&self) -> MarkerRender {
        match self.heading.degrees() {
            Some(rotation_deg) => MarkerRender::Arrow {
                at: self.at,
                rotation_deg,
                path: ARROW_PATH,
                fill_opacity: 1.0,
            },
            None => MarkerRender::Dot {
                at: self.at,
                radius_px: DOT_RADIUS_PX,
                fill_opacity: 1.0,
            },
        }
    }
}

/// A marker of either variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Plain(PlainMarker),
    Directional(DirectionalMarker),
}

impl Marker {
    /// Builds the variant for `kind`. Plain markers drop the heading.
    pub fn new(kind: MarkerKind, at: Gcj02Point, heading: Heading) -> Self {
        match kind {
            MarkerKind::Plain => Marker::Plain(PlainMarker::new(at)),
            MarkerKind::Arrow => Marker::Directional(DirectionalMarker::new(at, heading)),
        }
    }

    fn inner(&self) -> &dyn RotatableMarker {
        match self {
            Marker::Plain(m) => m,
            Marker::Directional(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RotatableMarker {
        match self {
            Marker::Plain(m) => m,
            Marker::Directional(m) => m,
        }
    }
}

impl RotatableMarker for Marker {
    fn set_position(&mut self, at: Gcj02Point) {
        self.inner_mut().set_position(at);
    }

    fn set_heading(&mut self, heading: Heading) {
        self.inner_mut().set_heading(heading);
    }

    fn position(&self) -> Gcj02Point {
        self.inner().position()
    }

    fn render(&self) -> MarkerRender {
        self.inner().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Gcj02Point = Gcj02Point { lng: 116.41, lat: 39.91 };

    #[test]
    fn test_heading_parse() {
        assert_eq!(Heading::parse(""), Heading::NONE);
        assert_eq!(Heading::parse("  "), Heading::NONE);
        assert_eq!(Heading::parse("270"), Heading(Some(270.0)));
        assert_eq!(Heading::parse("north"), Heading::NONE);
    }

    #[test]
    fn test_kind_from_attr() {
        assert_eq!(MarkerKind::from_attr(Some("arrow")), MarkerKind::Arrow);
        assert_eq!(MarkerKind::from_attr(Some("pin")), MarkerKind::Plain);
        assert_eq!(MarkerKind::from_attr(None), MarkerKind::Plain);
    }

    #[test]
    fn test_plain_marker_ignores_heading() {
        let mut marker = Marker::new(MarkerKind::Plain, AT, Heading(Some(90.0)));
        marker.set_heading(Heading(Some(180.0)));

        assert_eq!(marker.render(), MarkerRender::Icon { at: AT, icon: DEFAULT_ICON });
    }

    #[test]
    fn test_directional_marker_without_heading_is_dot() {
        let marker = Marker::new(MarkerKind::Arrow, AT, Heading::NONE);
        assert!(matches!(
            marker.render(),
            MarkerRender::Dot { radius_px, .. } if radius_px == DOT_RADIUS_PX
        ));
    }

    #[test]
    fn test_directional_marker_rotates() {
        let mut marker = Marker::new(MarkerKind::Arrow, AT, Heading::NONE);
        marker.set_heading(Heading(Some(45.0)));

        match marker.render() {
            MarkerRender::Arrow { rotation_deg, path, .. } => {
                assert_eq!(rotation_deg, 45.0);
                assert_eq!(path, ARROW_PATH);
            }
            other => panic!("expected arrow, got {other:?}"),
        }
    }

    #[test]
    fn test_set_position_moves_render() {
        let mut marker = Marker::new(MarkerKind::Plain, AT, Heading::NONE);
        let moved = Gcj02Point::new(121.48, 31.23);
        marker.set_position(moved);

        assert_eq!(marker.position(), moved);
        assert_eq!(marker.render().at(), moved);
    }
}
