//! Command-line configuration for the picker.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tint_tui::PickerConfig;
use tint_types::ColorValue;
use tint_util::{DEFAULT_ORIGIN, STORAGE_PATH_ENV};

/// Interactive HSV color picker with a persisted palette of saved colors.
///
/// Colors are given as JSON: `{"r":255,"g":0,"b":0}`, `[255,0,0]` or
/// `{"h":0,"s":100,"v":100}`. The final color is printed on exit in the
/// shape it was supplied in.
#[derive(Debug, Parser)]
#[command(name = "tint", version, about)]
pub struct Args {
    /// Start with the picker expanded.
    #[arg(long)]
    pub open: bool,

    /// Text shown in the picker header.
    #[arg(long, default_value = "ColorPicker")]
    pub label: String,

    /// Initial color as JSON.
    #[arg(long, value_name = "JSON")]
    pub value: Option<String>,

    /// Developer palette as a JSON array of colors.
    #[arg(long, value_name = "JSON")]
    pub palette: Option<String>,

    /// Storage scope; each origin keeps its own saved palette.
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Explicit storage document, overriding the per-origin default.
    #[arg(long, value_name = "PATH", env = STORAGE_PATH_ENV)]
    pub storage_path: Option<PathBuf>,

    /// Print the saved palette as JSON and exit.
    #[arg(long, conflicts_with = "clear_saved")]
    pub list_saved: bool,

    /// Forget the saved palette and exit.
    #[arg(long)]
    pub clear_saved: bool,
}

impl Args {
    /// Build the picker configuration, failing loudly on malformed colors.
    pub fn picker_config(&self) -> Result<PickerConfig> {
        let mut config = PickerConfig {
            open: self.open,
            label: self.label.clone(),
            ..PickerConfig::default()
        };
        if let Some(raw) = &self.value {
            config.value = ColorValue::parse_json(raw).with_context(|| format!("invalid --value {raw}"))?;
        }
        if let Some(raw) = &self.palette {
            config.palette = ColorValue::parse_palette_json(raw).with_context(|| format!("invalid --palette {raw}"))?;
        }
        Ok(config)
    }
}
