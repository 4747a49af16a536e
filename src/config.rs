use crate::error::ConfigError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvases below these floors produce unreadable clouds; dimensions are
/// clamped up to them rather than rejected.
pub const MIN_WIDTH: f32 = 200.0;
pub const MIN_HEIGHT: f32 = 150.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScaleKind {
    Linear,
    Log,
    #[default]
    Sqrt,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SpiralKind {
    Archimedean,
    #[default]
    Rectangular,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub width: f32,
    pub height: f32,
    pub font_family: String,
    pub min_angle: f32,
    pub max_angle: f32,
    pub orientations: usize,
    pub scale: ScaleKind,
    pub spiral: SpiralKind,
    pub max_words: usize,
    pub padding: f32,
    pub word_key: String,
    pub weight_key: String,
    pub seed: Option<u64>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 400.0,
            font_family: "impact".to_string(),
            min_angle: 0.0,
            max_angle: 0.0,
            orientations: 1,
            scale: ScaleKind::default(),
            spiral: SpiralKind::default(),
            max_words: 300,
            padding: 4.0,
            word_key: "text".to_string(),
            weight_key: "value".to_string(),
            seed: None,
        }
    }
}

impl CloudConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.min_angle) {
            return Err(ConfigError::MinAngleOutOfRange(self.min_angle));
        }
        if !(-90.0..=90.0).contains(&self.max_angle) {
            return Err(ConfigError::MaxAngleOutOfRange(self.max_angle));
        }
        if self.min_angle > self.max_angle {
            return Err(ConfigError::AngleOrder {
                min: self.min_angle,
                max: self.max_angle,
            });
        }
        Ok(())
    }

    /// Effective canvas size. Undersized or non-finite dimensions are
    /// clamped to the floors with a warning; the run always proceeds.
    pub fn clamped_size(&self) -> (f32, f32) {
        let mut width = self.width;
        let mut height = self.height;
        if !width.is_finite() || width < MIN_WIDTH {
            log::warn!("width {width} is below the minimum of {MIN_WIDTH}; using {MIN_WIDTH}");
            width = MIN_WIDTH;
        }
        if !height.is_finite() || height < MIN_HEIGHT {
            log::warn!("height {height} is below the minimum of {MIN_HEIGHT}; using {MIN_HEIGHT}");
            height = MIN_HEIGHT;
        }
        (width, height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub cloud: CloudConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::category10();
        let render = RenderConfig {
            background: theme.background.clone(),
        };
        Self {
            theme,
            cloud: CloudConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    colors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CloudConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    font_family: Option<String>,
    min_angle: Option<f32>,
    max_angle: Option<f32>,
    orientations: Option<usize>,
    scale: Option<ScaleKind>,
    spiral: Option<SpiralKind>,
    max_words: Option<usize>,
    padding: Option<f32>,
    word_key: Option<String>,
    weight_key: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    cloud: Option<CloudConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "default" || theme_name == "category10" {
            config.theme = Theme::category10();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.colors
            && !v.is_empty()
        {
            config.theme.palette = v;
        }
    }

    if let Some(cloud) = parsed.cloud {
        if let Some(v) = cloud.width {
            config.cloud.width = v;
        }
        if let Some(v) = cloud.height {
            config.cloud.height = v;
        }
        if let Some(v) = cloud.font_family {
            config.cloud.font_family = v;
        }
        if let Some(v) = cloud.min_angle {
            config.cloud.min_angle = v;
        }
        if let Some(v) = cloud.max_angle {
            config.cloud.max_angle = v;
        }
        if let Some(v) = cloud.orientations {
            config.cloud.orientations = v;
        }
        if let Some(v) = cloud.scale {
            config.cloud.scale = v;
        }
        if let Some(v) = cloud.spiral {
            config.cloud.spiral = v;
        }
        if let Some(v) = cloud.max_words {
            config.cloud.max_words = v;
        }
        if let Some(v) = cloud.padding {
            config.cloud.padding = v;
        }
        if let Some(v) = cloud.word_key {
            config.cloud.word_key = v;
        }
        if let Some(v) = cloud.weight_key {
            config.cloud.weight_key = v;
        }
        if let Some(v) = cloud.seed {
            config.cloud.seed = Some(v);
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}
