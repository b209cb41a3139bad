// Court configuration and coordinate conversion.

pub mod zone;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::TrackerError;

pub use zone::{classify, Zone};

/// Regulation court width in feet (sideline to sideline).
pub const COURT_WIDTH_FEET: f64 = 50.0;
/// Regulation court length in feet (baseline to baseline).
pub const COURT_LENGTH_FEET: f64 = 94.0;

// ---------------------------------------------------------------------------
// Ruleset
// ---------------------------------------------------------------------------

/// Governing federation whose three-point distances apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    #[default]
    Nba,
    Fiba,
    Ncaa,
    Wnba,
}

impl Ruleset {
    /// Every ruleset, in display order.
    pub const ALL: [Ruleset; 4] = [Ruleset::Nba, Ruleset::Fiba, Ruleset::Ncaa, Ruleset::Wnba];

    /// Three-point arc radius in feet, measured from the basket center.
    pub fn arc_radius(&self) -> f64 {
        match self {
            Ruleset::Nba => 23.75,
            Ruleset::Fiba | Ruleset::Ncaa | Ruleset::Wnba => 22.15,
        }
    }

    /// Reduced radius used inside the corner band, if this ruleset has one.
    ///
    /// Only the NBA line straightens out into a shorter corner three.
    pub fn corner_radius(&self) -> Option<f64> {
        match self {
            Ruleset::Nba => Some(22.0),
            Ruleset::Fiba | Ruleset::Ncaa | Ruleset::Wnba => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Ruleset::Nba => "NBA",
            Ruleset::Fiba => "FIBA",
            Ruleset::Ncaa => "NCAA",
            Ruleset::Wnba => "WNBA",
        }
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Whether the court's long axis is drawn left-to-right or top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// x spans the length, y spans the width.
    #[default]
    Horizontal,
    /// x spans the width, y spans the length.
    Vertical,
}

// ---------------------------------------------------------------------------
// CourtConfig
// ---------------------------------------------------------------------------

/// Process-wide court configuration consulted when classifying new shots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtConfig {
    pub ruleset: Ruleset,
    pub orientation: Orientation,
    #[serde(default = "default_width")]
    pub court_width_feet: f64,
    #[serde(default = "default_length")]
    pub court_length_feet: f64,
}

fn default_width() -> f64 {
    COURT_WIDTH_FEET
}

fn default_length() -> f64 {
    COURT_LENGTH_FEET
}

impl CourtConfig {
    pub fn new(ruleset: Ruleset, orientation: Orientation) -> Self {
        CourtConfig {
            ruleset,
            orientation,
            court_width_feet: COURT_WIDTH_FEET,
            court_length_feet: COURT_LENGTH_FEET,
        }
    }

    /// Rendered surface extent in feet as `(x_extent, y_extent)`.
    pub fn surface_extent(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Horizontal => (self.court_length_feet, self.court_width_feet),
            Orientation::Vertical => (self.court_width_feet, self.court_length_feet),
        }
    }
}

impl Default for CourtConfig {
    fn default() -> Self {
        CourtConfig::new(Ruleset::default(), Orientation::default())
    }
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A physical court position in feet, in the orientation the court is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x: f64,
    pub y: f64,
}

impl CourtPoint {
    /// Convert surface-relative fractions (`0.0..=1.0`) into court feet.
    ///
    /// Horizontal courts map `fx` onto the length and `fy` onto the width;
    /// vertical courts swap the two.
    pub fn from_fraction(
        fraction_x: f64,
        fraction_y: f64,
        config: &CourtConfig,
    ) -> Result<Self, TrackerError> {
        if !fraction_x.is_finite() || !fraction_y.is_finite() {
            return Err(TrackerError::InvalidCoordinate {
                x: fraction_x,
                y: fraction_y,
            });
        }
        let (x_extent, y_extent) = config.surface_extent();
        Ok(CourtPoint {
            x: fraction_x * x_extent,
            y: fraction_y * y_extent,
        })
    }

    /// Convert a pointer position inside a rendered container into court feet.
    pub fn from_pixels(
        pixel_x: f64,
        pixel_y: f64,
        container_width: f64,
        container_height: f64,
        config: &CourtConfig,
    ) -> Result<Self, TrackerError> {
        if container_width <= 0.0 || container_height <= 0.0 {
            return Err(TrackerError::InvalidCoordinate {
                x: pixel_x,
                y: pixel_y,
            });
        }
        Self::from_fraction(pixel_x / container_width, pixel_y / container_height, config)
    }
}

/// A classified shot location, ready to be recorded in the event store.
///
/// Only [`ShotPlacement::locate`] builds one, so the coordinates are finite
/// and the zone always matches them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotPlacement {
    fraction_x: f64,
    fraction_y: f64,
    feet: CourtPoint,
    zone: Zone,
}

impl ShotPlacement {
    /// Convert and classify a surface-relative click under `config`.
    pub fn locate(
        fraction_x: f64,
        fraction_y: f64,
        config: &CourtConfig,
    ) -> Result<Self, TrackerError> {
        let feet = CourtPoint::from_fraction(fraction_x, fraction_y, config)?;
        Ok(ShotPlacement {
            fraction_x,
            fraction_y,
            feet,
            zone: classify(feet.x, feet.y, config),
        })
    }

    pub fn fraction_x(&self) -> f64 {
        self.fraction_x
    }

    pub fn fraction_y(&self) -> f64 {
        self.fraction_y
    }

    pub fn feet(&self) -> CourtPoint {
        self.feet
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.fraction_x, self.fraction_y, self.feet.x, self.feet.y]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Placement with an arbitrary zone at the origin, for aggregation tests.
    #[cfg(test)]
    pub(crate) fn in_zone(zone: Zone) -> Self {
        ShotPlacement::raw(0.0, 0.0, CourtPoint { x: 0.0, y: 0.0 }, zone)
    }

    #[cfg(test)]
    pub(crate) fn raw(fraction_x: f64, fraction_y: f64, feet: CourtPoint, zone: Zone) -> Self {
        ShotPlacement {
            fraction_x,
            fraction_y,
            feet,
            zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruleset_radii() {
        assert_eq!(Ruleset::Nba.arc_radius(), 23.75);
        assert_eq!(Ruleset::Nba.corner_radius(), Some(22.0));
        for ruleset in [Ruleset::Fiba, Ruleset::Ncaa, Ruleset::Wnba] {
            assert_eq!(ruleset.arc_radius(), 22.15);
            assert_eq!(ruleset.corner_radius(), None);
        }
    }

    #[test]
    fn horizontal_fraction_maps_x_onto_length() {
        let config = CourtConfig::new(Ruleset::Nba, Orientation::Horizontal);
        let point = CourtPoint::from_fraction(0.5, 0.5, &config).unwrap();
        assert_eq!(point, CourtPoint { x: 47.0, y: 25.0 });
    }

    #[test]
    fn vertical_fraction_maps_y_onto_length() {
        let config = CourtConfig::new(Ruleset::Nba, Orientation::Vertical);
        let point = CourtPoint::from_fraction(1.0, 0.25, &config).unwrap();
        assert_eq!(point, CourtPoint { x: 50.0, y: 23.5 });
    }

    #[test]
    fn pixels_are_scaled_by_container() {
        let config = CourtConfig::default();
        let point = CourtPoint::from_pixels(470.0, 125.0, 940.0, 500.0, &config).unwrap();
        assert_eq!(point, CourtPoint { x: 47.0, y: 12.5 });
    }

    #[test]
    fn non_finite_fraction_is_rejected() {
        let config = CourtConfig::default();
        assert!(matches!(
            CourtPoint::from_fraction(f64::NAN, 0.2, &config),
            Err(TrackerError::InvalidCoordinate { .. })
        ));
        assert!(CourtPoint::from_fraction(0.2, f64::INFINITY, &config).is_err());
    }

    #[test]
    fn zero_sized_container_is_rejected() {
        let config = CourtConfig::default();
        assert!(CourtPoint::from_pixels(10.0, 10.0, 0.0, 300.0, &config).is_err());
    }

    #[test]
    fn placement_carries_zone() {
        let config = CourtConfig::default();
        // Just in front of the left basket.
        let placement = ShotPlacement::locate(0.08, 0.5, &config).unwrap();
        assert_eq!(placement.zone(), Zone::Paint);
        assert_eq!(placement.fraction_x(), 0.08);
        assert!(placement.is_finite());
    }

    #[test]
    fn config_serializes_lowercase_enums() {
        let json = serde_json::to_string(&CourtConfig::default()).unwrap();
        assert!(json.contains("\"ruleset\":\"nba\""));
        assert!(json.contains("\"orientation\":\"horizontal\""));
        assert!(json.contains("\"courtWidthFeet\":50.0"));
    }
}
