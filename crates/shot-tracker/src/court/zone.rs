// Shot zone classification: paint, mid-range, three-point.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CourtConfig, Orientation};

/// Width of the painted lane, centered on the basket line.
pub const PAINT_WIDTH_FEET: f64 = 16.0;
/// Depth of the painted lane measured from the baseline.
pub const PAINT_DEPTH_FEET: f64 = 19.0;
/// Distance from each baseline to the basket center.
pub const BASKET_OFFSET_FEET: f64 = 5.25;
/// Both the sideline distance from the basket line and the baseline depth
/// that bound the corner-three band.
pub const CORNER_BAND_FEET: f64 = 14.0;

/// Court region a field goal attempt was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    Paint,
    MidRange,
    ThreePoint,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Paint, Zone::MidRange, Zone::ThreePoint];

    /// Points a made field goal from this zone is worth.
    pub fn point_value(&self) -> u32 {
        match self {
            Zone::ThreePoint => 3,
            Zone::Paint | Zone::MidRange => 2,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Zone::Paint => "Paint",
            Zone::MidRange => "Mid-Range",
            Zone::ThreePoint => "3-Point",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Rotate a drawn-orientation point into `(along, across)` where `along`
/// runs baseline to baseline and `across` runs sideline to sideline.
fn normalize(x: f64, y: f64, orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Horizontal => (x, y),
        Orientation::Vertical => (y, x),
    }
}

/// Whether the point lies inside the painted lane at either end of the court.
pub fn is_in_paint(x: f64, y: f64, config: &CourtConfig) -> bool {
    let (along, across) = normalize(x, y, config.orientation);
    let center = config.court_width_feet / 2.0;
    let half_lane = PAINT_WIDTH_FEET / 2.0;

    let in_lane = across >= center - half_lane && across <= center + half_lane;
    let near_end = along <= PAINT_DEPTH_FEET;
    let far_end = along >= config.court_length_feet - PAINT_DEPTH_FEET;

    in_lane && (near_end || far_end)
}

/// Whether the point is in the corner band next to either baseline.
fn is_corner(along: f64, across: f64, config: &CourtConfig) -> bool {
    let center = config.court_width_feet / 2.0;
    let wide = (across - center).abs() >= CORNER_BAND_FEET;
    let near_end = along <= CORNER_BAND_FEET;
    let far_end = along >= config.court_length_feet - CORNER_BAND_FEET;
    wide && (near_end || far_end)
}

/// Distance from the point to whichever basket is closer.
pub fn distance_to_nearest_basket(x: f64, y: f64, config: &CourtConfig) -> f64 {
    let (along, across) = normalize(x, y, config.orientation);
    let center = config.court_width_feet / 2.0;
    let near = (along - BASKET_OFFSET_FEET).hypot(across - center);
    let far = (along - (config.court_length_feet - BASKET_OFFSET_FEET)).hypot(across - center);
    near.min(far)
}

/// Whether the point is beyond the three-point line of the nearer basket.
///
/// Inside the corner band the ruleset's corner radius applies when it has one.
pub fn is_three_point(x: f64, y: f64, config: &CourtConfig) -> bool {
    let (along, across) = normalize(x, y, config.orientation);
    let ruleset = config.ruleset;

    let radius = if is_corner(along, across, config) {
        ruleset.corner_radius().unwrap_or_else(|| ruleset.arc_radius())
    } else {
        ruleset.arc_radius()
    };

    distance_to_nearest_basket(x, y, config) > radius
}

/// Classify a court position (in feet, drawn orientation) into a zone.
///
/// The paint test wins over the three-point test; anything else, including
/// non-finite input, is mid-range.
pub fn classify(x: f64, y: f64, config: &CourtConfig) -> Zone {
    if is_in_paint(x, y, config) {
        Zone::Paint
    } else if is_three_point(x, y, config) {
        Zone::ThreePoint
    } else {
        Zone::MidRange
    }
}
