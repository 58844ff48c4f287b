use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FeatureKeyError;

pub const FEATURE_COUNT: usize = 10;

pub const DISCLAIMER: &str = "⚠️ This is a demonstration tool and should not be used for actual medical diagnosis. Always consult with healthcare professionals.";

macro_rules! feature_set {
    ($($variant:ident => $field:ident = $default:expr),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum FeatureKey {
            $($variant),+
        }

        impl FeatureKey {
            /// Every key, in wire/display order.
            pub const ALL: [FeatureKey; FEATURE_COUNT] = [$(FeatureKey::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(FeatureKey::$variant => stringify!($field)),+
                }
            }
        }

        /// The ten tumor measurements submitted for prediction.
        ///
        /// Serializes as a flat JSON object keyed by the snake_case field names.
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct FeatureSet {
            $(pub $field: f64),+
        }

        impl Default for FeatureSet {
            fn default() -> Self {
                Self {
                    $($field: $default),+
                }
            }
        }

        impl FeatureSet {
            pub fn get(&self, key: FeatureKey) -> f64 {
                match key {
                    $(FeatureKey::$variant => self.$field),+
                }
            }

            pub fn set(&mut self, key: FeatureKey, value: f64) {
                match key {
                    $(FeatureKey::$variant => self.$field = value),+
                }
            }
        }
    };
}

feature_set! {
    MeanRadius => mean_radius = 14.0,
    MeanTexture => mean_texture = 19.0,
    MeanPerimeter => mean_perimeter = 91.0,
    MeanArea => mean_area = 654.0,
    MeanSmoothness => mean_smoothness = 0.1,
    MeanCompactness => mean_compactness = 0.1,
    MeanConcavity => mean_concavity = 0.08,
    MeanConcavePoints => mean_concave_points = 0.05,
    MeanSymmetry => mean_symmetry = 0.18,
    MeanFractalDimension => mean_fractal_dimension = 0.06,
}

impl FeatureKey {
    pub fn descriptor(self) -> &'static FieldDescriptor {
        // FIELD_DESCRIPTORS is declared in the same order as ALL.
        &FIELD_DESCRIPTORS[self as usize]
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = FeatureKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FeatureKeyError::Unknown(s.to_string()))
    }
}

impl FeatureSet {
    /// Writes `raw` under `key` using lenient numeric coercion.
    pub fn update_from_input(&mut self, key: FeatureKey, raw: &str) -> f64 {
        let value = coerce_numeric_input(raw);
        self.set(key, value);
        value
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKey, f64)> + '_ {
        FeatureKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

/// Static rendering metadata for one input. Bounds and step are hints only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub key: FeatureKey,
    pub label: &'static str,
    pub description: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldDescriptor {
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const FIELD_DESCRIPTORS: [FieldDescriptor; FEATURE_COUNT] = [
    FieldDescriptor {
        key: FeatureKey::MeanRadius,
        label: "Mean Radius",
        description: "Mean of distances from center to points on perimeter",
        min: 6.0,
        max: 30.0,
        step: 0.1,
    },
    FieldDescriptor {
        key: FeatureKey::MeanTexture,
        label: "Mean Texture",
        description: "Standard deviation of gray-scale values",
        min: 9.0,
        max: 40.0,
        step: 0.1,
    },
    FieldDescriptor {
        key: FeatureKey::MeanPerimeter,
        label: "Mean Perimeter",
        description: "Mean perimeter of the tumor",
        min: 43.0,
        max: 189.0,
        step: 1.0,
    },
    FieldDescriptor {
        key: FeatureKey::MeanArea,
        label: "Mean Area",
        description: "Mean area of the tumor",
        min: 143.0,
        max: 2501.0,
        step: 1.0,
    },
    FieldDescriptor {
        key: FeatureKey::MeanSmoothness,
        label: "Mean Smoothness",
        description: "Local variation in radius lengths",
        min: 0.05,
        max: 0.16,
        step: 0.001,
    },
    FieldDescriptor {
        key: FeatureKey::MeanCompactness,
        label: "Mean Compactness",
        description: "Perimeter^2 / area - 1.0",
        min: 0.019,
        max: 0.345,
        step: 0.001,
    },
    FieldDescriptor {
        key: FeatureKey::MeanConcavity,
        label: "Mean Concavity",
        description: "Severity of concave portions",
        min: 0.0,
        max: 0.427,
        step: 0.001,
    },
    FieldDescriptor {
        key: FeatureKey::MeanConcavePoints,
        label: "Mean Concave Points",
        description: "Number of concave portions",
        min: 0.0,
        max: 0.201,
        step: 0.001,
    },
    FieldDescriptor {
        key: FeatureKey::MeanSymmetry,
        label: "Mean Symmetry",
        description: "Symmetry of the tumor",
        min: 0.106,
        max: 0.304,
        step: 0.001,
    },
    FieldDescriptor {
        key: FeatureKey::MeanFractalDimension,
        label: "Mean Fractal Dimension",
        description: "Coastline approximation - 1",
        min: 0.049,
        max: 0.097,
        step: 0.001,
    },
];

/// Two-variant diagnosis tag parsed from the service's free-form label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    Malignant,
    Benign,
    Unknown,
}

impl Diagnosis {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("malignant") {
            Self::Malignant
        } else if label.eq_ignore_ascii_case("benign") {
            Self::Benign
        } else {
            Self::Unknown
        }
    }
}

/// Parses user input the way a browser's `parseFloat` does: leading
/// whitespace is skipped and the longest decimal prefix wins. Anything that
/// does not yield a finite, non-zero number becomes `0.0`.
pub fn coerce_numeric_input(raw: &str) -> f64 {
    let text = raw.trim_start();
    let prefix = &text[..numeric_prefix_len(text)];
    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}

fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut idx = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(idx);
    idx += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(idx) == Some(&b'.') {
        let frac_digits = digits_from(idx + 1);
        if int_digits + frac_digits > 0 {
            idx += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(idx + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(idx + 1 + sign);
        if exp_digits > 0 {
            idx += 1 + sign + exp_digits;
        }
    }
    idx
}

/// Shortest round-trip rendering, `92` rather than `92.0`.
pub fn display_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let features = FeatureSet::default();
        assert_eq!(features.mean_radius, 14.0);
        assert_eq!(features.mean_texture, 19.0);
        assert_eq!(features.mean_perimeter, 91.0);
        assert_eq!(features.mean_area, 654.0);
        assert_eq!(features.mean_smoothness, 0.1);
        assert_eq!(features.mean_compactness, 0.1);
        assert_eq!(features.mean_concavity, 0.08);
        assert_eq!(features.mean_concave_points, 0.05);
        assert_eq!(features.mean_symmetry, 0.18);
        assert_eq!(features.mean_fractal_dimension, 0.06);
    }

    #[test]
    fn coerces_numeric_prefixes_like_parse_float() {
        assert_eq!(coerce_numeric_input("12.5"), 12.5);
        assert_eq!(coerce_numeric_input("  7"), 7.0);
        assert_eq!(coerce_numeric_input("12abc"), 12.0);
        assert_eq!(coerce_numeric_input(".5"), 0.5);
        assert_eq!(coerce_numeric_input("5."), 5.0);
        assert_eq!(coerce_numeric_input("-3.25"), -3.25);
        assert_eq!(coerce_numeric_input("+4"), 4.0);
        assert_eq!(coerce_numeric_input("1e3"), 1000.0);
        assert_eq!(coerce_numeric_input("2.5E-2x"), 0.025);
        assert_eq!(coerce_numeric_input("3e"), 3.0);
        assert_eq!(coerce_numeric_input("3e+"), 3.0);
    }

    #[test]
    fn coerces_non_numeric_input_to_zero() {
        for raw in ["", "   ", "abc", ".", "-", "+.", "e5", "NaN", "Infinity", "1e400", "-0"] {
            let value = coerce_numeric_input(raw);
            assert_eq!(value, 0.0, "input {raw:?}");
            assert!(value.is_sign_positive(), "input {raw:?}");
        }
    }

    #[test]
    fn update_from_input_writes_only_the_addressed_field() {
        let mut features = FeatureSet::default();
        features.update_from_input(FeatureKey::MeanArea, "700.5");
        assert_eq!(features.mean_area, 700.5);

        features.update_from_input(FeatureKey::MeanSymmetry, "not a number");
        assert_eq!(features.mean_symmetry, 0.0);
        assert_eq!(features.mean_radius, 14.0);
    }

    #[test]
    fn serializes_as_flat_object_with_wire_names() {
        let json = serde_json::to_value(FeatureSet::default()).expect("serialize");
        let object = json.as_object().expect("object");
        assert_eq!(object.len(), FEATURE_COUNT);
        for key in FeatureKey::ALL {
            assert!(object.contains_key(key.as_str()), "missing {key}");
        }
        assert_eq!(object["mean_concave_points"], serde_json::json!(0.05));
    }

    #[test]
    fn feature_keys_round_trip_through_wire_names() {
        assert_eq!(
            "mean_fractal_dimension".parse::<FeatureKey>().expect("known key"),
            FeatureKey::MeanFractalDimension
        );
        assert!("mean_volume".parse::<FeatureKey>().is_err());
    }

    #[test]
    fn descriptors_line_up_with_keys() {
        for key in FeatureKey::ALL {
            assert_eq!(key.descriptor().key, key);
        }
        let radius = FeatureKey::MeanRadius.descriptor();
        assert_eq!(radius.label, "Mean Radius");
        assert!(radius.in_range(14.0));
        assert!(!radius.in_range(31.0));
    }

    #[test]
    fn diagnosis_parsing_is_case_insensitive_with_fallback() {
        assert_eq!(Diagnosis::from_label("Malignant"), Diagnosis::Malignant);
        assert_eq!(Diagnosis::from_label("BENIGN"), Diagnosis::Benign);
        assert_eq!(Diagnosis::from_label(" benign "), Diagnosis::Benign);
        assert_eq!(Diagnosis::from_label("inconclusive"), Diagnosis::Unknown);
    }

    #[test]
    fn displays_numbers_in_shortest_form() {
        assert_eq!(display_number(92.0), "92");
        assert_eq!(display_number(92.5), "92.5");
        assert_eq!(display_number(0.06), "0.06");
        assert_eq!(display_number(-0.0), "0");
    }
}
