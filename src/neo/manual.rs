//! Hand-entered "what if" bodies.

use bevy::prelude::Resource;

/// Raw text of the what-if form, as typed.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ManualForm {
    pub name: String,
    pub semi_major_axis: String,
    pub eccentricity: String,
    pub inclination: String,
    pub diam_min: String,
    pub diam_max: String,
    pub absolute_magnitude: String,
    pub velocity: String,
}

impl Default for ManualForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            semi_major_axis: "1.5".into(),
            eccentricity: "0.1".into(),
            inclination: "10".into(),
            diam_min: "0.1".into(),
            diam_max: "0.2".into(),
            absolute_magnitude: "20".into(),
            velocity: "15".into(),
        }
    }
}

fn parse_field(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl ManualForm {
    /// Parse the form. `serial` names the body when the name is empty.
    pub fn parse(&self, serial: u32) -> ManualEntry {
        let name = self.name.trim();
        ManualEntry {
            name: if name.is_empty() {
                manual_name(serial)
            } else {
                name.to_string()
            },
            semi_major_axis_au: parse_field(&self.semi_major_axis),
            eccentricity: parse_field(&self.eccentricity),
            inclination_deg: parse_field(&self.inclination),
            diam_min_km: parse_field(&self.diam_min),
            diam_max_km: parse_field(&self.diam_max),
            absolute_magnitude_h: parse_field(&self.absolute_magnitude),
            velocity_km_s: parse_field(&self.velocity),
        }
    }
}

/// `Manual-NNNN`, wrapping at 10000.
pub fn manual_name(serial: u32) -> String {
    format!("Manual-{:04}", serial % 10_000)
}

/// Parsed what-if input. Missing orbital elements fall back to defaults
/// when the body is built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualEntry {
    pub name: String,
    pub semi_major_axis_au: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination_deg: Option<f64>,
    pub diam_min_km: Option<f64>,
    pub diam_max_km: Option<f64>,
    pub absolute_magnitude_h: Option<f64>,
    pub velocity_km_s: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_values() {
        let entry = ManualForm::default().parse(7);
        assert_eq!(entry.name, "Manual-0007");
        assert_eq!(entry.semi_major_axis_au, Some(1.5));
        assert_eq!(entry.eccentricity, Some(0.1));
        assert_eq!(entry.inclination_deg, Some(10.0));
        assert_eq!(entry.diam_min_km, Some(0.1));
        assert_eq!(entry.diam_max_km, Some(0.2));
        assert_eq!(entry.absolute_magnitude_h, Some(20.0));
        assert_eq!(entry.velocity_km_s, Some(15.0));
    }

    #[test]
    fn test_bad_text_is_absent() {
        let form = ManualForm {
            name: "  Bennu  ".into(),
            semi_major_axis: "far".into(),
            velocity: "".into(),
            ..Default::default()
        };
        let entry = form.parse(1);
        assert_eq!(entry.name, "Bennu");
        assert_eq!(entry.semi_major_axis_au, None);
        assert_eq!(entry.velocity_km_s, None);
    }

    #[test]
    fn test_manual_name_wraps() {
        assert_eq!(manual_name(12_345), "Manual-2345");
    }
}
