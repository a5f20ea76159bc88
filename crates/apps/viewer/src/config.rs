use std::env;
use std::str::FromStr;

use clap::ValueEnum;
use foundation::screen::ScreenSize;
use overlay::placer::PopupGeometry;
use session::coordinator::SessionConfig;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_VIEWPORT: ScreenSize = ScreenSize {
    width: 1280.0,
    height: 800.0,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum PopupVariant {
    #[default]
    Standard,
    /// Shorter connector, for narrow screens.
    Compact,
}

impl PopupVariant {
    pub fn geometry(self) -> PopupGeometry {
        match self {
            PopupVariant::Standard => PopupGeometry::standard(),
            PopupVariant::Compact => PopupGeometry::compact(),
        }
    }
}

impl FromStr for PopupVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub api_base: String,
    pub viewport: ScreenSize,
    pub popup_variant: PopupVariant,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            viewport: DEFAULT_VIEWPORT,
            popup_variant: PopupVariant::default(),
        }
    }
}

impl ViewerConfig {
    /// Reads `PINMAP_*` variables; unset or invalid values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_base = lookup("PINMAP_API_BASE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);
        let width = parse_var(&lookup, "PINMAP_VIEWPORT_WIDTH", positive)
            .unwrap_or(defaults.viewport.width);
        let height = parse_var(&lookup, "PINMAP_VIEWPORT_HEIGHT", positive)
            .unwrap_or(defaults.viewport.height);
        let popup_variant = parse_var::<PopupVariant>(&lookup, "PINMAP_POPUP_VARIANT", |_| true)
            .unwrap_or(defaults.popup_variant);

        Self {
            api_base,
            viewport: ScreenSize::new(width, height),
            popup_variant,
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(
        mut self,
        api_base: Option<String>,
        width: Option<f64>,
        height: Option<f64>,
        variant: Option<PopupVariant>,
    ) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        if let Some(width) = width.filter(positive) {
            self.viewport.width = width;
        }
        if let Some(height) = height.filter(positive) {
            self.viewport.height = height;
        }
        if let Some(variant) = variant {
            self.popup_variant = variant;
        }
        self
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            popup: self.popup_variant.geometry(),
            ..SessionConfig::default()
        }
    }
}

fn positive(v: &f64) -> bool {
    v.is_finite() && *v > 0.0
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => Some(v),
        _ => {
            warn!(%key, value = %raw, "ignoring invalid setting");
            None
        }
    }
}
