//! Map marker descriptions for the availability map view
//!
//! Converts located joined records into colour-banded markers with popup
//! text. Rendering the map and rasterising popups is left to the consumer;
//! markers serialise to JSON for it.

use crate::app::models::{GeoLocation, JoinedRecord};
use crate::config::MarkerThresholds;
use crate::constants::markers;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Availability band deciding marker colour. Low availability is red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityBand {
    /// At or below the scarce threshold (red)
    Scarce,
    /// Between the thresholds (yellow)
    Limited,
    /// Above the plentiful threshold (green)
    Plentiful,
}

impl AvailabilityBand {
    pub fn classify(percentage: f64, thresholds: &MarkerThresholds) -> Self {
        if percentage > thresholds.plentiful_above {
            AvailabilityBand::Plentiful
        } else if percentage > thresholds.scarce_at_or_below {
            AvailabilityBand::Limited
        } else {
            AvailabilityBand::Scarce
        }
    }

    /// Fill colour of the marker circle
    pub fn inner_color(&self) -> &'static str {
        match self {
            AvailabilityBand::Scarce => markers::SCARCE_INNER,
            AvailabilityBand::Limited => markers::LIMITED_INNER,
            AvailabilityBand::Plentiful => markers::PLENTIFUL_INNER,
        }
    }

    /// Outline colour of the marker
    pub fn outer_color(&self) -> &'static str {
        match self {
            AvailabilityBand::Scarce => markers::SCARCE_OUTER,
            AvailabilityBand::Limited => markers::LIMITED_OUTER,
            AvailabilityBand::Plentiful => markers::PLENTIFUL_OUTER,
        }
    }
}

impl fmt::Display for AvailabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AvailabilityBand::Scarce => "scarce",
            AvailabilityBand::Limited => "limited",
            AvailabilityBand::Plentiful => "plentiful",
        };
        f.write_str(name)
    }
}

/// One carpark marker on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub number: String,
    pub location: GeoLocation,
    pub band: AvailabilityBand,
    pub inner_color: &'static str,
    pub outer_color: &'static str,
    /// Multi-line text for the marker popup
    pub popup: String,
}

impl MapMarker {
    /// Marker for a record, `None` when it has no location
    pub fn from_record(record: &JoinedRecord, thresholds: &MarkerThresholds) -> Option<Self> {
        let location = record.location()?;
        let band = AvailabilityBand::classify(record.percentage(), thresholds);

        Some(Self {
            number: record.number().to_string(),
            location,
            band,
            inner_color: band.inner_color(),
            outer_color: band.outer_color(),
            popup: popup_text(record),
        })
    }
}

/// Markers for every located record, in input order
pub fn build_markers(records: &[JoinedRecord], thresholds: &MarkerThresholds) -> Vec<MapMarker> {
    records
        .iter()
        .filter_map(|record| MapMarker::from_record(record, thresholds))
        .collect()
}

/// Serialise markers for an external map renderer
pub fn markers_to_json(markers: &[MapMarker]) -> Result<String> {
    Ok(serde_json::to_string_pretty(markers)?)
}

/// Popup body: number, lot counts, percentage and address
pub fn popup_text(record: &JoinedRecord) -> String {
    format!(
        "{}\nAvailable Lots: {}\nTotal Lots: {}\nPercentage: {}%\nAddress: {}",
        record.number(),
        record.lots_available(),
        record.total_lots(),
        format_percentage(record.percentage()),
        record.display_address()
    )
}

/// Round to two decimals, always showing at least one (`30.0`, `33.33`)
fn format_percentage(percentage: f64) -> String {
    let rounded = (percentage * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::test_support::{joined, joined_at};

    #[test]
    fn test_classify_bands() {
        let thresholds = MarkerThresholds::default();

        assert_eq!(
            AvailabilityBand::classify(0.0, &thresholds),
            AvailabilityBand::Scarce
        );
        assert_eq!(
            AvailabilityBand::classify(25.0, &thresholds),
            AvailabilityBand::Scarce
        );
        assert_eq!(
            AvailabilityBand::classify(25.5, &thresholds),
            AvailabilityBand::Limited
        );
        assert_eq!(
            AvailabilityBand::classify(75.0, &thresholds),
            AvailabilityBand::Limited
        );
        assert_eq!(
            AvailabilityBand::classify(75.1, &thresholds),
            AvailabilityBand::Plentiful
        );
        assert_eq!(
            AvailabilityBand::classify(140.0, &thresholds),
            AvailabilityBand::Plentiful
        );
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(AvailabilityBand::Scarce.inner_color(), "#FF0000");
        assert_eq!(AvailabilityBand::Limited.outer_color(), "#FFA500");
        assert_eq!(AvailabilityBand::Plentiful.inner_color(), "#00FF00");
    }

    #[test]
    fn test_marker_requires_location() {
        let thresholds = MarkerThresholds::default();

        assert!(MapMarker::from_record(&joined("A", 10, 5, "X"), &thresholds).is_none());

        let marker =
            MapMarker::from_record(&joined_at("B", 10, 9, "Y", 1.3, 103.8), &thresholds).unwrap();
        assert_eq!(marker.number, "B");
        assert_eq!(marker.band, AvailabilityBand::Plentiful);
        assert_eq!(marker.location, GeoLocation::new(1.3, 103.8));
    }

    #[test]
    fn test_build_markers_skips_unlocated() {
        let records = vec![
            joined_at("A", 10, 1, "X", 1.0, 103.0),
            joined("B", 10, 5, "Y"),
            joined_at("C", 10, 5, "Z", 1.1, 103.1),
        ];
        let markers = build_markers(&records, &MarkerThresholds::default());

        let numbers: Vec<_> = markers.iter().map(|m| m.number.as_str()).collect();
        assert_eq!(numbers, vec!["A", "C"]);
        assert_eq!(markers[0].band, AvailabilityBand::Scarce);
        assert_eq!(markers[1].band, AvailabilityBand::Limited);
    }

    #[test]
    fn test_popup_text() {
        let record = joined_at("ACB", 3, 1, "\"BLK 270, ALBERT CENTRE\"", 1.3, 103.8);

        assert_eq!(
            popup_text(&record),
            "ACB\nAvailable Lots: 1\nTotal Lots: 3\nPercentage: 33.33%\nAddress: BLK 270, ALBERT CENTRE"
        );
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(30.0), "30.0");
        assert_eq!(format_percentage(0.0), "0.0");
        assert_eq!(format_percentage(66.666666), "66.67");
        assert_eq!(format_percentage(12.5), "12.5");
    }

    #[test]
    fn test_markers_to_json() {
        let records = vec![joined_at("A", 10, 1, "X", 1.0, 103.0)];
        let json = markers_to_json(&build_markers(&records, &MarkerThresholds::default())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["number"], "A");
        assert_eq!(value[0]["band"], "scarce");
        assert_eq!(value[0]["inner_color"], "#FF0000");
        assert_eq!(value[0]["location"]["latitude"], 1.0);
    }
}
