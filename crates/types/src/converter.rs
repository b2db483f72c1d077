//! Converter registry: maps each accepted color representation to and from HSV.

use crate::color::{ColorValue, Hsv, Representation};

/// Converts between one external representation and HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    RgbObject,
    RgbArray,
    /// Identity: HSV in, HSV out.
    HsvObject,
}

impl Converter {
    /// Representation this converter produces on [`Converter::invert`].
    pub fn representation(self) -> Representation {
        match self {
            Converter::RgbObject => Representation::RgbObject,
            Converter::RgbArray => Representation::RgbArray,
            Converter::HsvObject => Representation::HsvObject,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Converter::RgbObject => "rgb-object",
            Converter::RgbArray => "rgb-array",
            Converter::HsvObject => "hsv-object",
        }
    }

    /// Convert `value` into HSV.
    pub fn to_hsv(self, value: &ColorValue) -> Hsv {
        match value {
            ColorValue::RgbObject(rgb) | ColorValue::RgbArray(rgb) => rgb.to_hsv(),
            ColorValue::HsvObject(hsv) => *hsv,
        }
    }

    /// Convert an HSV color back into this converter's representation.
    pub fn invert(self, hsv: Hsv) -> ColorValue {
        match self {
            Converter::RgbObject => ColorValue::RgbObject(hsv.to_rgb()),
            Converter::RgbArray => ColorValue::RgbArray(hsv.to_rgb()),
            Converter::HsvObject => ColorValue::HsvObject(hsv),
        }
    }
}

/// Select the converter matching the representation `value` was supplied in.
pub fn select_converter(value: &ColorValue) -> Converter {
    match value.representation() {
        Representation::RgbObject => Converter::RgbObject,
        Representation::RgbArray => Converter::RgbArray,
        Representation::HsvObject => Converter::HsvObject,
    }
}

/// Map every entry to HSV through its own converter. Palettes may mix shapes.
pub fn to_hsv_all(values: &[ColorValue]) -> Vec<Hsv> {
    values.iter().map(|value| select_converter(value).to_hsv(value)).collect()
}
