//! NEO feed snapshot schema and parsing.
//!
//! The feed is third-party JSON. Every numeric field may arrive as a number,
//! a numeric string, null, or not at all, so numbers are read leniently and
//! anything unparseable becomes `None`. Nested objects of the wrong shape
//! are dropped the same way, and a record that cannot be read at all is
//! skipped without failing the rest of the feed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bevy::log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::impact::ApproachRecord;
use crate::orbit::OrbitDetails;

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("failed to open feed snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feed document contains no recognizable records")]
    Unrecognized,
}

/// Lenient field readers for `deserialize_with`.
mod lenient {
    use super::*;

    pub(super) fn value_to_f64(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(value_to_f64))
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
    }

    /// Strings and numbers both become text; used for ids.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        })
    }

    /// Nested object; a value of any other shape becomes `None`.
    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.and_then(|v| serde_json::from_value(v).ok()))
    }

    /// Array of objects; unreadable entries are left out.
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}

/// One NEO record as delivered by the feed.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NeoRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub designation: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub absolute_magnitude_h: Option<f64>,
    #[serde(deserialize_with = "lenient::object")]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(deserialize_with = "lenient::list")]
    pub close_approach_data: Vec<CloseApproach>,
    #[serde(deserialize_with = "lenient::object")]
    pub orbital_data: Option<OrbitalData>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EstimatedDiameter {
    #[serde(deserialize_with = "lenient::object")]
    pub kilometers: Option<DiameterRange>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiameterRange {
    #[serde(deserialize_with = "lenient::number")]
    pub estimated_diameter_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub estimated_diameter_max: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CloseApproach {
    #[serde(deserialize_with = "lenient::text")]
    pub orbiting_body: Option<String>,
    #[serde(deserialize_with = "lenient::object")]
    pub miss_distance: Option<MissDistance>,
    #[serde(deserialize_with = "lenient::object")]
    pub relative_velocity: Option<RelativeVelocity>,
    #[serde(deserialize_with = "lenient::text")]
    pub close_approach_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub close_approach_date_full: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub epoch_date_close_approach: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MissDistance {
    #[serde(deserialize_with = "lenient::number")]
    pub kilometers: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelativeVelocity {
    #[serde(deserialize_with = "lenient::number")]
    pub kilometers_per_second: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrbitalData {
    #[serde(deserialize_with = "lenient::number")]
    pub semi_major_axis: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub eccentricity: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub inclination: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub perihelion_distance: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub aphelion_distance: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub orbital_period: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub minimum_orbit_intersection: Option<f64>,
    #[serde(deserialize_with = "lenient::object")]
    pub orbit_class: Option<OrbitClass>,
    #[serde(deserialize_with = "lenient::text")]
    pub orbit_uncertainty: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub data_arc_in_days: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub epoch_osculation: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrbitClass {
    #[serde(deserialize_with = "lenient::text")]
    pub orbit_class_type: Option<String>,
}

impl NeoRecord {
    /// Name, else designation, else "NEO".
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.designation.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("NEO")
            .to_string()
    }

    /// Key used for deduplication: id, else name.
    fn dedup_key(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.display_name())
    }

    fn is_identified(&self) -> bool {
        self.id.is_some() || self.name.is_some() || self.designation.is_some()
    }

    pub fn diameter_bounds_km(&self) -> (Option<f64>, Option<f64>) {
        self.estimated_diameter
            .as_ref()
            .and_then(|d| d.kilometers.as_ref())
            .map_or((None, None), |k| {
                (k.estimated_diameter_min, k.estimated_diameter_max)
            })
    }

    /// Raw orbital elements; `None` entries are filled in by the caller.
    pub fn raw_elements(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        self.orbital_data.as_ref().map_or((None, None, None), |o| {
            (o.semi_major_axis, o.eccentricity, o.inclination)
        })
    }

    /// Published orbit determination values.
    pub fn orbit_details(&self) -> OrbitDetails {
        let Some(o) = &self.orbital_data else {
            return OrbitDetails::default();
        };
        OrbitDetails {
            perihelion_au: o.perihelion_distance,
            aphelion_au: o.aphelion_distance,
            period_days: o.orbital_period,
            moid_au: o.minimum_orbit_intersection,
            orbit_class: o
                .orbit_class
                .as_ref()
                .and_then(|c| c.orbit_class_type.clone()),
            uncertainty: o.orbit_uncertainty.clone(),
            data_arc_days: o.data_arc_in_days,
            epoch_osculation: o.epoch_osculation.clone(),
        }
    }

    pub fn approach_records(&self) -> Vec<ApproachRecord> {
        self.close_approach_data
            .iter()
            .map(|c| ApproachRecord {
                orbiting_body: c.orbiting_body.clone().unwrap_or_default(),
                miss_distance_km: c.miss_distance.as_ref().and_then(|m| m.kilometers),
                relative_velocity_km_s: c
                    .relative_velocity
                    .as_ref()
                    .and_then(|v| v.kilometers_per_second),
                epoch_ms: c.epoch_date_close_approach,
                date: c
                    .close_approach_date_full
                    .clone()
                    .or_else(|| c.close_approach_date.clone()),
            })
            .collect()
    }
}

/// Raw record values of a feed document.
///
/// The date-keyed envelope is flattened in date order. `None` when the
/// document has none of the recognized shapes.
fn raw_records(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Object(mut map) if map.contains_key("near_earth_objects") => {
            match map.remove("near_earth_objects")? {
                Value::Object(by_date) => {
                    let mut days: Vec<(String, Value)> = by_date.into_iter().collect();
                    days.sort_by(|a, b| a.0.cmp(&b.0));
                    Some(
                        days.into_iter()
                            .flat_map(|(_, day)| match day {
                                Value::Array(items) => items,
                                other => vec![other],
                            })
                            .collect(),
                    )
                }
                Value::Array(items) => Some(items),
                _ => None,
            }
        }
        Value::Array(items) => Some(items),
        single @ Value::Object(_) => Some(vec![single]),
        _ => None,
    }
}

/// Parse a feed document into unique records sorted by display name.
///
/// Accepts the date-keyed envelope, a bare array of records, or a single
/// record. Records that are not objects are skipped. Duplicates keep their
/// first occurrence.
pub fn parse_feed(json: &str) -> Result<Vec<NeoRecord>, FeedError> {
    let document: Value = serde_json::from_str(json)?;
    let single = document.is_object() && document.get("near_earth_objects").is_none();
    let values = raw_records(document).ok_or(FeedError::Unrecognized)?;

    let mut skipped = 0;
    let raw: Vec<NeoRecord> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<NeoRecord>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!("Skipping unreadable feed record: {}", err);
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        warn!("Skipped {} unreadable feed records", skipped);
    }
    if single && !raw.iter().any(NeoRecord::is_identified) {
        return Err(FeedError::Unrecognized);
    }

    let total = raw.len();
    let mut seen = HashSet::new();
    let mut records: Vec<NeoRecord> = raw
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect();
    records.sort_by_key(NeoRecord::display_name);

    if records.len() < total {
        debug!("Dropped {} duplicate feed records", total - records.len());
    }
    Ok(records)
}

/// Read and parse a feed snapshot file.
pub fn load_feed_file(path: impl AsRef<Path>) -> Result<Vec<NeoRecord>, FeedError> {
    let path = path.as_ref();
    info!("Loading NEO feed from {:?}", path);

    let json = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_feed(&json)?;

    info!("Loaded {} NEO records", records.len());
    Ok(records)
}
