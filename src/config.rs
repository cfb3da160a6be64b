use crate::color::Palette;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_THICKNESS: u32 = 22;
pub const DEFAULT_LENGTH: usize = 10;
pub const DEFAULT_SPEED_MS: u64 = 15;

/// Options for one snake. Omitted fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side of a segment, in pixels.
    pub thickness: u32,
    pub color: Palette,
    /// Number of segments.
    pub length: usize,
    /// Minimum milliseconds between two moves.
    pub speed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            color: Palette::default(),
            length: DEFAULT_LENGTH,
            speed: DEFAULT_SPEED_MS,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(json).context("invalid snake config")?;
        Ok(config.normalized())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("loading config {}", path.display()))
    }

    /// Zero thickness or length count as unset. A zero speed is kept: move every frame.
    pub fn normalized(mut self) -> Self {
        if self.thickness == 0 {
            self.thickness = DEFAULT_THICKNESS;
        }
        if self.length == 0 {
            self.length = DEFAULT_LENGTH;
        }
        self
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
        let d = Config::default();
        assert_eq!((d.thickness, d.length, d.speed), (22, 10, 15));
        assert_eq!(d.color, Palette::Solid("red".parse().unwrap()));
    }

    #[test]
    fn zero_sizes_fall_back() {
        let c = Config::from_json(r#"{"thickness": 0, "length": 0, "speed": 0}"#).unwrap();
        assert_eq!(c.thickness, DEFAULT_THICKNESS);
        assert_eq!(c.length, DEFAULT_LENGTH);
        assert_eq!(c.speed(), Duration::ZERO);
    }

    #[test]
    fn full_config() {
        let json = r##"{
            "thickness": 8,
            "color": ["#000000", "rgb(255,255,255)"],
            "length": 40,
            "speed": 30
        }"##;
        let c = Config::from_json(json).unwrap();
        let black: Color = "#000000".parse().unwrap();
        let white: Color = "rgb(255,255,255)".parse().unwrap();
        assert_eq!(c.color, Palette::Gradient(black, white));
        assert_eq!(c.speed(), Duration::from_millis(30));
    }

    #[test]
    fn keyword_color_from_json() {
        let json = String::from(r#"{"color": "Blue", "length": 3}"#);
        let c = Config::from_json(&json).unwrap();
        drop(json);
        assert_eq!(c.color, Palette::Solid("blue".parse().unwrap()));
        assert_eq!(c.color.color_at(2, c.length).to_string(), "blue");

        let c = Config::from_json(r#"{"color": ["red", "lime"]}"#).unwrap();
        assert_eq!(c.color.color_at(5, 10).to_string(), "#808000");
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = Config::from_json(r#"{"color": "not-a-color"}"#).unwrap_err();
        assert!(format!("{err:#}").contains("invalid snake config"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
