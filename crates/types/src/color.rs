//! Color values accepted by the picker.
//!
//! Owners hand the picker colors in one of three JSON shapes: an RGB object
//! (`{"r":255,"g":0,"b":0}`), an RGB triple (`[255,0,0]`) or an HSV object
//! (`{"h":0,"s":100,"v":100}`). The shape is resolved once, where the JSON is
//! ingested, and carried as the [`ColorValue`] variant from then on.

use std::fmt;

use serde::de::Error as _;
use serde::ser::{SerializeStruct, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Upper bound of the hue channel, in degrees.
pub const HUE_MAX: f64 = 360.0;

/// Upper bound of the saturation and value channels, in percent.
pub const PERCENT_MAX: f64 = 100.0;

/// Errors raised while ingesting a color from external input.
#[derive(Debug, Error)]
pub enum ColorError {
    /// The JSON value matches none of the supported color shapes.
    #[error("unrecognized color shape: {0}")]
    UnrecognizedShape(String),
    /// An RGB triple with the wrong number of elements.
    #[error("rgb array must have exactly 3 elements, found {0}")]
    ArrayArity(usize),
    /// A component that is not a JSON number.
    #[error("color component `{component}` is not a number")]
    NotNumeric { component: &'static str },
    /// A component outside of its valid range.
    #[error("color component `{component}` = {value} is outside {min}..={max}")]
    OutOfRange {
        component: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Input was not valid JSON.
    #[error("invalid color JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to HSV with hue in degrees and saturation/value in percent.
    pub fn to_hsv(self) -> Hsv {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        Hsv {
            h: hue,
            s: saturation * PERCENT_MAX,
            v: max * PERCENT_MAX,
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color in HSV space: hue in degrees (`0..=360`), saturation and value in
/// percent (`0..=100`). This is the picker's editing representation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to RGB, rounding each channel to the nearest integer.
    pub fn to_rgb(self) -> Rgb {
        let hue = self.h.rem_euclid(HUE_MAX) / 60.0;
        let saturation = (self.s / PERCENT_MAX).clamp(0.0, 1.0);
        let value = (self.v / PERCENT_MAX).clamp(0.0, 1.0);

        let chroma = value * saturation;
        let sector = hue.floor();
        let x = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
        let m = value - chroma;

        let (r, g, b) = match sector as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Rgb {
            r: to_channel(r + m),
            g: to_channel(g + m),
            b: to_channel(b + m),
        }
    }

    /// Lowercase `#rrggbb` form used for swatches.
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// Component comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Hsv, tolerance: f64) -> bool {
        (self.h - other.h).abs() <= tolerance
            && (self.s - other.s).abs() <= tolerance
            && (self.v - other.v).abs() <= tolerance
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Which of the accepted shapes a [`ColorValue`] came in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    RgbObject,
    RgbArray,
    HsvObject,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::RgbObject => "rgb-object",
            Representation::RgbArray => "rgb-array",
            Representation::HsvObject => "hsv-object",
        };
        f.write_str(name)
    }
}

/// A color tagged with the shape the owner supplied it in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    /// `{"r":..,"g":..,"b":..}`
    RgbObject(Rgb),
    /// `[r, g, b]`
    RgbArray(Rgb),
    /// `{"h":..,"s":..,"v":..}`
    HsvObject(Hsv),
}

impl Default for ColorValue {
    fn default() -> Self {
        ColorValue::HsvObject(Hsv::new(1.0, 50.0, 50.0))
    }
}

impl ColorValue {
    pub fn representation(&self) -> Representation {
        match self {
            ColorValue::RgbObject(_) => Representation::RgbObject,
            ColorValue::RgbArray(_) => Representation::RgbArray,
            ColorValue::HsvObject(_) => Representation::HsvObject,
        }
    }

    /// Parse a single color from its JSON text.
    pub fn parse_json(input: &str) -> Result<Self, ColorError> {
        let value: Value = serde_json::from_str(input)?;
        Self::try_from(&value)
    }

    /// Parse a JSON array of colors. Entries may mix shapes.
    pub fn parse_palette_json(input: &str) -> Result<Vec<Self>, ColorError> {
        let value: Value = serde_json::from_str(input)?;
        match value {
            Value::Array(items) => items.iter().map(Self::try_from).collect(),
            other => Err(ColorError::UnrecognizedShape(format!("expected a palette array, found {other}"))),
        }
    }

    /// JSON form in the same shape the value was ingested with.
    pub fn to_json(&self) -> Value {
        match self {
            ColorValue::RgbObject(rgb) => serde_json::json!({ "r": rgb.r, "g": rgb.g, "b": rgb.b }),
            ColorValue::RgbArray(rgb) => serde_json::json!([rgb.r, rgb.g, rgb.b]),
            ColorValue::HsvObject(hsv) => serde_json::json!({ "h": hsv.h, "s": hsv.s, "v": hsv.v }),
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl TryFrom<&Value> for ColorValue {
    type Error = ColorError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => {
                let [r, g, b] = items.as_slice() else {
                    return Err(ColorError::ArrayArity(items.len()));
                };
                Ok(ColorValue::RgbArray(Rgb {
                    r: rgb_channel("r", r)?,
                    g: rgb_channel("g", g)?,
                    b: rgb_channel("b", b)?,
                }))
            }
            Value::Object(map) => {
                if let (Some(r), Some(g), Some(b)) = (map.get("r"), map.get("g"), map.get("b")) {
                    return Ok(ColorValue::RgbObject(Rgb {
                        r: rgb_channel("r", r)?,
                        g: rgb_channel("g", g)?,
                        b: rgb_channel("b", b)?,
                    }));
                }
                if let (Some(h), Some(s), Some(v)) = (map.get("h"), map.get("s"), map.get("v")) {
                    return Ok(ColorValue::HsvObject(Hsv {
                        h: bounded("h", h, HUE_MAX)?,
                        s: bounded("s", s, PERCENT_MAX)?,
                        v: bounded("v", v, PERCENT_MAX)?,
                    }));
                }
                Err(ColorError::UnrecognizedShape(value.to_string()))
            }
            other => Err(ColorError::UnrecognizedShape(other.to_string())),
        }
    }
}

fn bounded(component: &'static str, value: &Value, max: f64) -> Result<f64, ColorError> {
    let number = value.as_f64().ok_or(ColorError::NotNumeric { component })?;
    if !number.is_finite() || !(0.0..=max).contains(&number) {
        return Err(ColorError::OutOfRange {
            component,
            value: number,
            min: 0.0,
            max,
        });
    }
    Ok(number)
}

fn rgb_channel(component: &'static str, value: &Value) -> Result<u8, ColorError> {
    bounded(component, value, 255.0).map(|number| number.round() as u8)
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ColorValue::RgbObject(rgb) => {
                let mut state = serializer.serialize_struct("Rgb", 3)?;
                state.serialize_field("r", &rgb.r)?;
                state.serialize_field("g", &rgb.g)?;
                state.serialize_field("b", &rgb.b)?;
                state.end()
            }
            ColorValue::RgbArray(rgb) => {
                let mut state = serializer.serialize_tuple(3)?;
                state.serialize_element(&rgb.r)?;
                state.serialize_element(&rgb.g)?;
                state.serialize_element(&rgb.b)?;
                state.end()
            }
            ColorValue::HsvObject(hsv) => {
                let mut state = serializer.serialize_struct("Hsv", 3)?;
                state.serialize_field("h", &hsv.h)?;
                state.serialize_field("s", &hsv.s)?;
                state.serialize_field("v", &hsv.v)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ColorValue::try_from(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primaries_convert_to_expected_hues() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsv(), Hsv::new(0.0, 100.0, 100.0));
        assert_eq!(Rgb::new(0, 255, 0).to_hsv(), Hsv::new(120.0, 100.0, 100.0));
        assert_eq!(Rgb::new(0, 0, 255).to_hsv(), Hsv::new(240.0, 100.0, 100.0));
        assert_eq!(Rgb::new(0, 0, 0).to_hsv(), Hsv::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn hsv_to_rgb_wraps_full_turn() {
        assert_eq!(Hsv::new(360.0, 100.0, 100.0).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsv::new(300.0, 100.0, 100.0).to_rgb(), Rgb::new(255, 0, 255));
    }

    #[test]
    fn rgb_survives_hsv_round_trip() {
        for rgb in [
            Rgb::new(10, 20, 30),
            Rgb::new(255, 255, 255),
            Rgb::new(128, 64, 200),
            Rgb::new(1, 254, 77),
        ] {
            assert_eq!(rgb.to_hsv().to_rgb(), rgb);
        }
    }

    #[test]
    fn default_hsv_renders_a_hex_swatch() {
        assert_eq!(Hsv::new(1.0, 50.0, 50.0).to_hex(), "#804140");
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
    }

    #[test]
    fn ingestion_tags_each_shape() {
        let object = ColorValue::try_from(&json!({"r": 10, "g": 20, "b": 30})).unwrap();
        assert_eq!(object, ColorValue::RgbObject(Rgb::new(10, 20, 30)));

        let array = ColorValue::try_from(&json!([10, 20, 30])).unwrap();
        assert_eq!(array, ColorValue::RgbArray(Rgb::new(10, 20, 30)));

        let hsv = ColorValue::try_from(&json!({"h": 200, "s": 50, "v": 50})).unwrap();
        assert_eq!(hsv, ColorValue::HsvObject(Hsv::new(200.0, 50.0, 50.0)));
    }

    #[test]
    fn ingestion_rejects_unknown_shapes_loudly() {
        assert!(matches!(
            ColorValue::try_from(&json!({"x": 1})),
            Err(ColorError::UnrecognizedShape(_))
        ));
        assert!(matches!(ColorValue::try_from(&json!([1, 2])), Err(ColorError::ArrayArity(2))));
        assert!(matches!(
            ColorValue::try_from(&json!([1, 2, 256])),
            Err(ColorError::OutOfRange { component: "b", .. })
        ));
        assert!(matches!(
            ColorValue::try_from(&json!({"h": "red", "s": 1, "v": 1})),
            Err(ColorError::NotNumeric { component: "h" })
        ));
        assert!(ColorValue::parse_json("not json").is_err());
    }

    #[test]
    fn serialization_preserves_the_ingested_shape() {
        let palette = ColorValue::parse_palette_json(r#"[[1,2,3],{"r":4,"g":5,"b":6},{"h":7,"s":8,"v":9}]"#).unwrap();
        let encoded = serde_json::to_value(&palette).unwrap();
        assert_eq!(
            encoded,
            json!([[1, 2, 3], {"r": 4, "g": 5, "b": 6}, {"h": 7.0, "s": 8.0, "v": 9.0}])
        );
        let decoded: Vec<ColorValue> = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, palette);
    }
}
