//! Marker hover interaction
//!
//! Each marker layer is either idle or hovering one feature. Entering a
//! marker shows a tooltip and the pointer cursor; leaving restores both.

use serde::Serialize;

use crate::model::GeoFeature;

/// Move `lng` by whole turns until it is within 180 degrees of `pointer_lng`.
///
/// When the map is zoomed out far enough to repeat the world, this keeps the
/// tooltip on the copy of the marker under the pointer.
pub fn wrap_longitude(lng: f64, pointer_lng: f64) -> f64 {
    if !lng.is_finite() || !pointer_lng.is_finite() {
        return lng;
    }
    let gap = pointer_lng - lng;
    if gap.abs() <= 180.0 {
        return lng;
    }
    // Fewest whole turns toward the pointer that bring the gap within 180.
    let turns = ((gap.abs() - 180.0) / 360.0).ceil();
    let mut wrapped = lng + 360.0 * turns * gap.signum();
    let rest = pointer_lng - wrapped;
    if rest.abs() > 180.0 {
        wrapped += 360.0 * rest.signum();
    }
    wrapped
}

/// Tooltip text for a node marker
pub fn tooltip_text(feature: &GeoFeature) -> String {
    format!("{} {}", feature.ip(), feature.asn())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum HoverState {
    Idle,
    Hovering { feature: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    Default,
    Pointer,
}

impl Cursor {
    /// CSS value for the map canvas
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Pointer => "pointer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    /// Anchor as `[longitude, latitude]`
    pub lng_lat: [f64; 2],
    pub text: String,
}

/// Hover state of one marker layer
#[derive(Debug)]
pub struct HoverController<'a> {
    layer_id: &'a str,
    features: &'a [GeoFeature],
    state: HoverState,
    cursor: Cursor,
    tooltip: Option<Tooltip>,
}

impl<'a> HoverController<'a> {
    pub fn new(layer_id: &'a str, features: &'a [GeoFeature]) -> Self {
        Self {
            layer_id,
            features,
            state: HoverState::Idle,
            cursor: Cursor::Default,
            tooltip: None,
        }
    }

    pub fn layer_id(&self) -> &str {
        self.layer_id
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Pointer entered the marker of `feature` at longitude `pointer_lng`.
    ///
    /// Unknown feature indices leave the controller untouched.
    pub fn pointer_enter(&mut self, feature: usize, pointer_lng: f64) -> Option<&Tooltip> {
        let node = self.features.get(feature)?;

        self.state = HoverState::Hovering { feature };
        self.cursor = Cursor::Pointer;
        self.tooltip = Some(Tooltip {
            lng_lat: [wrap_longitude(node.longitude(), pointer_lng), node.latitude()],
            text: tooltip_text(node),
        });
        self.tooltip.as_ref()
    }

    /// Pointer left the marker layer
    pub fn pointer_leave(&mut self) {
        self.state = HoverState::Idle;
        self.cursor = Cursor::Default;
        self.tooltip = None;
    }
}
