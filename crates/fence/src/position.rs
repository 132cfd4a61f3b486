//! Read-only position map.
//!
//! Shows a single marker for a `"lat,lng[,heading]"` position string taken
//! from the page and follows it when the server says the position changed.

use std::cell::RefCell;
use std::rc::Rc;

use marsgeo_geo::Wgs84Point;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::channel::EventChannel;
use crate::marker::{Heading, Marker, MarkerKind, RotatableMarker};
use crate::overlay::{MapView, MarkerLayer};
use crate::record::parse_number;
use crate::{FenceError, Result};

/// Server event asking the view to re-centre.
pub const SET_VIEW_EVENT: &str = "set_view";

/// Server event announcing a new position.
pub const UPDATE_POSITION_EVENT: &str = "update_position";

/// A reported position with optional heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub point: Wgs84Point,
    pub heading: Heading,
}

impl Position {
    /// Parses `"lat,lng"` or `"lat,lng,heading"`.
    ///
    /// # Example
    /// ```
    /// use marsgeo_fence::position::Position;
    ///
    /// let pos = Position::parse("39.9042,116.4074,90").unwrap();
    /// assert_eq!(pos.point.lng, 116.4074);
    /// assert_eq!(pos.heading.degrees(), Some(90.0));
    ///
    /// assert!(Position::parse("39.9042").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split(',');
        let (Some(lat), Some(lng)) = (parts.next(), parts.next()) else {
            return Err(FenceError::InvalidPosition(text.to_string()));
        };
        let heading = parts.next().map(Heading::parse).unwrap_or_default();

        let lat = parse_number("latitude", lat)?;
        let lng = parse_number("longitude", lng)?;

        Ok(Self {
            point: Wgs84Point::checked(lng, lat)?,
            heading,
        })
    }
}

/// Where the view reads its position text from.
pub trait PositionSource {
    fn position_text(&self) -> String;
}

impl<F> PositionSource for F
where
    F: Fn() -> String,
{
    fn position_text(&self) -> String {
        self()
    }
}

/// Marker plus map for one position.
#[derive(Debug)]
pub struct PositionView<S, V> {
    source: S,
    view: V,
    marker: Marker,
}

impl<S, V> PositionView<S, V>
where
    S: PositionSource,
    V: MapView + MarkerLayer,
{
    /// Builds the marker for the current position and centres on it at `zoom`.
    pub fn mount(source: S, mut view: V, kind: MarkerKind, zoom: u8) -> Result<Self> {
        let position = Position::parse(&source.position_text())?;
        let shown = position.point.to_gcj02();

        let marker = Marker::new(kind, shown, position.heading);
        view.draw_marker(&marker.render());
        view.set_view(shown, zoom);

        Ok(Self { source, view, marker })
    }

    /// Re-reads the position, moves and turns the marker, and re-centres at
    /// the current zoom. Unparseable text leaves the view untouched.
    pub fn refresh(&mut self) {
        let text = self.source.position_text();
        let position = match Position::parse(&text) {
            Ok(position) => position,
            Err(err) => {
                warn!(error = %err, "Ignoring position update");
                return;
            }
        };

        let shown = position.point.to_gcj02();
        self.marker.set_position(shown);
        self.marker.set_heading(position.heading);
        self.view.draw_marker(&self.marker.render());

        let zoom = self.view.zoom();
        self.view.set_view(shown, zoom);
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the map, for hosts relaying user zoom changes.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

impl<S, V> PositionView<S, V>
where
    S: PositionSource + 'static,
    V: MapView + MarkerLayer + 'static,
{
    /// Registers `set_view` and `update_position` handlers that refresh the
    /// view. Attaching again replaces the previous handlers.
    pub fn attach(view: &Rc<RefCell<Self>>, channel: &mut EventChannel) {
        for name in [SET_VIEW_EVENT, UPDATE_POSITION_EVENT] {
            let view = Rc::clone(view);
            channel.on(name, move |_| view.borrow_mut().refresh());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerRender;
    use crate::overlay::MemoryOverlay;
    use crate::FenceErrorCode;
    use marsgeo_geo::to_gcj02;
    use serde_json::Value;

    fn shared(text: &str) -> (Rc<RefCell<String>>, impl Fn() -> String + 'static) {
        let text = Rc::new(RefCell::new(text.to_string()));
        let reader = Rc::clone(&text);
        (text, move || reader.borrow().clone())
    }

    #[test]
    fn test_parse_without_heading() {
        let pos = Position::parse("31.2304,121.4737").unwrap();
        assert_eq!(pos.point, Wgs84Point::new(121.4737, 31.2304));
        assert_eq!(pos.heading, Heading::NONE);

        let pos = Position::parse("31.2304,121.4737,").unwrap();
        assert_eq!(pos.heading, Heading::NONE);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Position::parse("").unwrap_err().code(), FenceErrorCode::InvalidPosition);
        assert_eq!(Position::parse("x,1").unwrap_err().code(), FenceErrorCode::InvalidNumber);
        assert_eq!(Position::parse("95,1").unwrap_err().code(), FenceErrorCode::OutOfRange);
    }

    #[test]
    fn test_mount_centres_at_zoom() {
        let (_, source) = shared("39.9042,116.4074,");
        let view = PositionView::mount(source, MemoryOverlay::default(), MarkerKind::Plain, 15).unwrap();

        let shown = to_gcj02(Wgs84Point::new(116.4074, 39.9042));
        assert_eq!(view.view().view_center, Some(shown));
        assert_eq!(view.view().zoom, 15);
        assert!(matches!(view.view().rendered_marker, Some(MarkerRender::Icon { .. })));
    }

    #[test]
    fn test_mount_rejects_bad_position() {
        let (_, source) = shared("nowhere");
        assert!(PositionView::mount(source, MemoryOverlay::default(), MarkerKind::Arrow, 15).is_err());
    }

    #[test]
    fn test_refresh_keeps_current_zoom() {
        let (text, source) = shared("39.9042,116.4074,");
        let mut view = PositionView::mount(source, MemoryOverlay::default(), MarkerKind::Arrow, 15).unwrap();
        view.view_mut().zoom = 11;

        *text.borrow_mut() = "31.2304,121.4737,180".to_string();
        view.refresh();

        let shown = to_gcj02(Wgs84Point::new(121.4737, 31.2304));
        assert_eq!(view.view().view_center, Some(shown));
        assert_eq!(view.view().zoom, 11);
        assert!(matches!(
            view.view().rendered_marker,
            Some(MarkerRender::Arrow { rotation_deg, .. }) if rotation_deg == 180.0
        ));
    }

    #[test]
    fn test_refresh_ignores_bad_text() {
        let (text, source) = shared("39.9042,116.4074,45");
        let mut view = PositionView::mount(source, MemoryOverlay::default(), MarkerKind::Arrow, 15).unwrap();
        let before = view.view().clone();

        *text.borrow_mut() = "garbage".to_string();
        view.refresh();

        assert_eq!(*view.view(), before);
    }

    #[test]
    fn test_channel_events_refresh_view() {
        let (text, source) = shared("39.9042,116.4074,");
        let view = PositionView::mount(source, MemoryOverlay::default(), MarkerKind::Plain, 15).unwrap();
        let view = Rc::new(RefCell::new(view));

        let mut channel = EventChannel::new();
        PositionView::attach(&view, &mut channel);
        PositionView::attach(&view, &mut channel);

        *text.borrow_mut() = "22.5431,114.0579".to_string();
        assert!(channel.dispatch(UPDATE_POSITION_EVENT, &Value::Null));

        let shown = to_gcj02(Wgs84Point::new(114.0579, 22.5431));
        assert_eq!(view.borrow().marker().position(), shown);
        assert!(channel.dispatch(SET_VIEW_EVENT, &Value::Null));
        assert_eq!(view.borrow().view().view_center, Some(shown));
    }
}
