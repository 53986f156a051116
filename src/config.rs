use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gfx::math::Color;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_surface_id")]
    pub surface_id: String,

    #[serde(default = "default_fps_cap")]
    pub fps_cap: u32,

    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_margins")]
    pub margins: Margins,

    #[serde(default)]
    pub meter: MeterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub anchor: Anchor,
    pub exclusive_zone: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterFormat {
    Percentage,
    Fraction,
    TextBar,
}

/// Appearance and behavior of one liquid-fill meter. Read-only once an
/// engine has been built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_goal_amount")]
    pub goal_amount: f32,

    /// Gradient stops, top then bottom, as `#RRGGBB[AA]`.
    #[serde(default = "default_water_color")]
    pub water_color: [String; 2],

    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Wave amplitude in pixels.
    #[serde(default = "default_wave_height")]
    pub wave_height: f32,

    /// Phase advance in radians per frame.
    #[serde(default = "default_wave_speed")]
    pub wave_speed: f32,

    #[serde(default = "default_counter_format")]
    pub counter_format: CounterFormat,

    #[serde(default = "default_transition_frames")]
    pub transition_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface_id: default_surface_id(),
            position: default_position(),
            margins: default_margins(),
            fps_cap: default_fps_cap(),
            meter: MeterConfig::default(),
        }
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            goal_amount: default_goal_amount(),
            water_color: default_water_color(),
            opacity: default_opacity(),
            wave_height: default_wave_height(),
            wave_speed: default_wave_speed(),
            counter_format: default_counter_format(),
            transition_frames: default_transition_frames(),
        }
    }
}

fn default_surface_id() -> String {
    "wavefill".to_string()
}

fn default_position() -> Position {
    Position {
        anchor: Anchor::TopRight,
        exclusive_zone: 0,
    }
}

fn default_margins() -> Margins {
    Margins {
        top: 8,
        right: 8,
        bottom: 8,
        left: 8,
    }
}

fn default_fps_cap() -> u32 {
    60
}

fn default_width() -> u32 {
    300
}

fn default_height() -> u32 {
    100
}

fn default_goal_amount() -> f32 {
    100.0
}

fn default_water_color() -> [String; 2] {
    ["#0096FF".to_string(), "#0033AA".to_string()]
}

fn default_opacity() -> f32 {
    0.8
}

fn default_wave_height() -> f32 {
    6.0
}

fn default_wave_speed() -> f32 {
    0.015
}

fn default_counter_format() -> CounterFormat {
    CounterFormat::Percentage
}

fn default_transition_frames() -> u32 {
    50
}

impl MeterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        // negated comparisons also reject NaN
        if !(self.goal_amount > 0.0) {
            return Err(ConfigError::InvalidGoal(self.goal_amount));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        if self.transition_frames == 0 {
            return Err(ConfigError::InvalidTransitionFrames);
        }
        self.colors().map(|_| ())
    }

    pub fn colors(&self) -> Result<[Color; 2], ConfigError> {
        let parse = |hex: &String| {
            Color::from_hex(hex).ok_or_else(|| ConfigError::InvalidColor(hex.clone()))
        };
        Ok([parse(&self.water_color[0])?, parse(&self.water_color[1])?])
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("wavefill").join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_meter_is_valid() {
        let meter = MeterConfig::default();
        assert_eq!((meter.width, meter.height), (300, 100));
        assert_eq!(meter.goal_amount, 100.0);
        assert_eq!(meter.opacity, 0.8);
        assert_eq!(meter.wave_height, 6.0);
        assert_eq!(meter.counter_format, CounterFormat::Percentage);
        assert_eq!(meter.transition_frames, 50);
        assert!(meter.validate().is_ok());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r##"
            fps_cap = 30

            [meter]
            goal_amount = 250.0
            counter_format = "text_bar"
            water_color = ["#FF0000", "#00FF00"]
            "##,
        )
        .unwrap();

        assert_eq!(config.fps_cap, 30);
        assert_eq!(config.surface_id, "wavefill");
        assert_eq!(config.meter.goal_amount, 250.0);
        assert_eq!(config.meter.counter_format, CounterFormat::TextBar);
        assert_eq!(config.meter.width, 300);
        assert_eq!(config.position.anchor, Anchor::TopRight);
    }

    #[rstest]
    #[case::zero_goal(MeterConfig { goal_amount: 0.0, ..Default::default() }, ConfigError::InvalidGoal(0.0))]
    #[case::negative_goal(MeterConfig { goal_amount: -5.0, ..Default::default() }, ConfigError::InvalidGoal(-5.0))]
    #[case::opacity_above_one(MeterConfig { opacity: 1.5, ..Default::default() }, ConfigError::InvalidOpacity(1.5))]
    #[case::opacity_below_zero(MeterConfig { opacity: -0.1, ..Default::default() }, ConfigError::InvalidOpacity(-0.1))]
    #[case::zero_width(MeterConfig { width: 0, ..Default::default() }, ConfigError::InvalidDimensions { width: 0, height: 100 })]
    #[case::zero_height(MeterConfig { height: 0, ..Default::default() }, ConfigError::InvalidDimensions { width: 300, height: 0 })]
    #[case::no_frames(MeterConfig { transition_frames: 0, ..Default::default() }, ConfigError::InvalidTransitionFrames)]
    fn rejects_invalid_meter(#[case] meter: MeterConfig, #[case] expected: ConfigError) {
        assert_eq!(meter.validate(), Err(expected));
    }

    #[test]
    fn rejects_nan_goal_and_bad_color() {
        let nan_goal = MeterConfig {
            goal_amount: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan_goal.validate(), Err(ConfigError::InvalidGoal(_))));

        let bad_color = MeterConfig {
            water_color: ["#0096FF".into(), "blue".into()],
            ..Default::default()
        };
        assert_eq!(
            bad_color.validate(),
            Err(ConfigError::InvalidColor("blue".into()))
        );
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("wavefill-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.meter.counter_format = CounterFormat::Fraction;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.meter.counter_format, CounterFormat::Fraction);

        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(
            Config::load_from(&path).unwrap().meter.counter_format,
            CounterFormat::Percentage
        );
    }
}
