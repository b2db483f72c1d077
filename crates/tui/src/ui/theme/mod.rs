//! Theme styling for the picker chrome.
//!
//! Swatches always render their own colors; the theme only covers borders,
//! labels, hints and focus indicators.

use std::env;

use tracing::debug;

pub mod dracula;
pub mod roles;
pub mod theme_helpers;

pub use dracula::{DraculaTheme, DraculaThemeHighContrast};
pub use roles::Theme;

/// Environment variable selecting the chrome theme.
pub const THEME_ENV: &str = "TINT_THEME";

/// Selects a theme from `TINT_THEME`, falling back to Dracula.
pub fn load() -> Box<dyn Theme> {
    let requested = env::var(THEME_ENV).unwrap_or_default();
    match requested.trim().to_ascii_lowercase().as_str() {
        "dracula-hc" | "dracula-high-contrast" | "high-contrast" => Box::new(DraculaThemeHighContrast::new()),
        "" | "dracula" => Box::new(DraculaTheme::new()),
        other => {
            debug!(theme = other, "unknown theme requested; using Dracula");
            Box::new(DraculaTheme::new())
        }
    }
}
