use crate::config::StyleConfig;
use arcplot::CategoryId;
use palette::rgb::FromHexError;
use palette::{Srgb, Srgba, WithAlpha};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// d3's "Accent" categorical scheme.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];

#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self, alpha: f64) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(alpha)
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_str(s.trim()).map(HexColor)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

/// Ordinal colour scale over the sorted category list.
///
/// A category gets the palette entry at its index in the sorted list, wrapping around when
/// there are more categories than colours. Categories outside the list get the fallback.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    colors: Vec<Srgba<f64>>,
    unknown: Srgba<f64>,
}

impl CategoryPalette {
    pub fn new(colors: Vec<Srgba<f64>>, unknown: Srgba<f64>) -> Self {
        Self { colors, unknown }
    }

    pub fn color_for(&self, categories: &[CategoryId], category: &CategoryId) -> Srgba<f64> {
        if self.colors.is_empty() {
            return self.unknown;
        }
        categories
            .iter()
            .position(|c| c == category)
            .map(|i| self.colors[i % self.colors.len()])
            .unwrap_or(self.unknown)
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Theme::default().palette
    }
}

pub struct ThemeColors {
    pub background: Option<Srgba<f64>>,
    pub level_ring: Srgba<f64>,
    pub level_label: Srgba<f64>,
    pub label_text: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: None,
            level_ring: Srgba::new(127.0 / 255.0, 127.0 / 255.0, 127.0 / 255.0, 0.04),
            level_label: Srgba::new(0.8, 0.8, 0.8, 1.0),
            label_text: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Colours and annotation metrics used by the chart renderer.
pub struct Theme {
    pub palette: CategoryPalette,
    pub colors: ThemeColors,
    pub annotation_padding: f64,
    pub category_label_width: f64,
    pub label_height: f64,
    pub line_thickness: f64,
    pub font_family: String,
    pub font_size: f64,
}

impl Theme {
    pub fn from_style(style: &StyleConfig) -> Self {
        let palette = CategoryPalette::new(
            style.palette.iter().map(|c| c.to_srgba(1.0)).collect(),
            style.unknown_color.to_srgba(1.0),
        );
        let colors = ThemeColors {
            background: style.background.map(|c| c.to_srgba(1.0)),
            ..Default::default()
        };

        Self {
            palette,
            colors,
            annotation_padding: style.annotation_padding,
            category_label_width: style.category_label_width,
            label_height: style.label_height,
            line_thickness: style.line_thickness,
            font_family: style.font_family.clone(),
            font_size: style.font_size,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_style(&StyleConfig::default())
    }
}
