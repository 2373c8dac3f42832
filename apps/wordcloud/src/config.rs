use anyhow::{Context, Result};

use crate::layout::{
    Canvas, FontFamily, FontSizeRange, LayoutConfig, RotationPolicy, SizeScale, SortPolicy,
    SpiralConfig, SpiralKind,
};

/// Command-line configuration loaded from environment variables.
/// Every variable is optional; defaults match the dashboard's 500x300 cloud.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub min_font: f32,
    pub max_font: f32,
    pub scale: SizeScale,
    pub font: FontFamily,
    /// `None` keeps every glyph horizontal.
    pub rotations: Option<Vec<f32>>,
    pub seed: u64,
    pub spiral: SpiralKind,
    pub max_attempts: u32,
    pub sort: SortPolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            width: parse_or(&lookup, "WORDCLOUD_WIDTH", 500.0)?,
            height: parse_or(&lookup, "WORDCLOUD_HEIGHT", 300.0)?,
            padding: parse_or(&lookup, "WORDCLOUD_PADDING", 5.0)?,
            min_font: parse_or(&lookup, "WORDCLOUD_MIN_FONT", 10.0)?,
            max_font: parse_or(&lookup, "WORDCLOUD_MAX_FONT", 60.0)?,
            scale: parse_or(&lookup, "WORDCLOUD_SCALE", SizeScale::Sqrt)?,
            font: parse_or(&lookup, "WORDCLOUD_FONT", FontFamily::Arial)?,
            rotations: lookup("WORDCLOUD_ROTATIONS")
                .map(|raw| parse_angles(&raw))
                .transpose()?,
            seed: parse_or(&lookup, "WORDCLOUD_SEED", 0)?,
            spiral: parse_or(&lookup, "WORDCLOUD_SPIRAL", SpiralKind::Archimedean)?,
            max_attempts: parse_or(&lookup, "WORDCLOUD_MAX_ATTEMPTS", 4000)?,
            sort: parse_or(&lookup, "WORDCLOUD_SORT", SortPolicy::DescendingWeight)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Engine options. Validation happens in the engine, not here.
    pub fn layout_config(&self) -> LayoutConfig {
        let rotation = match &self.rotations {
            Some(angles) => RotationPolicy::Discrete {
                angles: angles.clone(),
                seed: self.seed,
            },
            None => RotationPolicy::Fixed { angle: 0.0 },
        };
        LayoutConfig {
            padding: self.padding,
            font_size_range: FontSizeRange::new(self.min_font, self.max_font),
            size_scale: self.scale,
            font: self.font,
            rotation,
            spiral: SpiralConfig {
                kind: self.spiral,
                ..SpiralConfig::default()
            },
            max_attempts_per_term: self.max_attempts,
            sort: self.sort,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
    }
}

/// Parses a comma-separated angle list such as `"-90, 0, 90"`.
fn parse_angles(raw: &str) -> Result<Vec<f32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .with_context(|| format!("WORDCLOUD_ROTATIONS contains an invalid angle '{s}'"))
        })
        .collect()
}
