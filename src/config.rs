use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid colour {0:?}, expected #RRGGBB")]
    Colour(String),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const PINK: Rgb = Rgb(0xEC, 0x48, 0x99);

    pub fn parse_hex(text: &str) -> Result<Self, ConfigError> {
        let hex = text
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ConfigError::Colour(text.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ConfigError::Colour(text.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

/// Background and live-cell colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            foreground: Rgb::PINK,
        }
    }
}

/// Settings for the splash window, read from an optional JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Logical pixels per cell
    pub cell_size: u32,
    pub update_interval_ms: u64,
    pub seed_density: f64,
    pub background: String,
    pub foreground: String,
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    pub font_path: Option<PathBuf>,
    pub show_overlay: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            cell_size: 8,
            update_interval_ms: 10,
            seed_density: 0.3,
            background: "#000000".to_string(),
            foreground: "#EC4899".to_string(),
            window_width: 1024,
            window_height: 768,
            title: "Myalo - Your AI Assistant".to_string(),
            font_path: None,
            show_overlay: true,
        }
    }
}

impl BackgroundConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Config from the file at `path`, or defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell_size must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.seed_density) {
            return Err(ConfigError::Invalid(format!(
                "seed_density {} is outside [0, 1]",
                self.seed_density
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        self.palette()?;
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            background: Rgb::parse_hex(&self.background)?,
            foreground: Rgb::parse_hex(&self.foreground)?,
        })
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackgroundConfig::default();
        assert_eq!(config.cell_size, 8);
        assert_eq!(config.update_interval(), Duration::from_millis(10));
        assert_eq!(config.seed_density, 0.3);
        assert_eq!(config.palette().unwrap(), Palette::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r##"{ "cell_size": 4, "foreground": "#00ff00" }"##;
        let config = BackgroundConfig::from_json(json).unwrap();
        assert_eq!(config.cell_size, 4);
        assert_eq!(config.update_interval_ms, 10);
        assert_eq!(config.palette().unwrap().foreground, Rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#EC4899").unwrap(), Rgb::PINK);
        assert_eq!(Rgb::parse_hex("#000000").unwrap(), Rgb::BLACK);
        assert!(matches!(Rgb::parse_hex("EC4899"), Err(ConfigError::Colour(_))));
        assert!(matches!(Rgb::parse_hex("#EC48"), Err(ConfigError::Colour(_))));
        assert!(matches!(Rgb::parse_hex("#GG0000"), Err(ConfigError::Colour(_))));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            BackgroundConfig::from_json(r#"{ "cell_size": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BackgroundConfig::from_json(r#"{ "seed_density": 1.5 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BackgroundConfig::from_json(r#"{ "background": "black" }"#),
            Err(ConfigError::Colour(_))
        ));
        assert!(matches!(
            BackgroundConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_hex_colour_inside_json_string() {
        let json = r##"{ "background": "#102030", "foreground": "#A0B0C0" }"##;
        let palette = BackgroundConfig::from_json(json).unwrap().palette().unwrap();
        assert_eq!(palette.background, Rgb(0x10, 0x20, 0x30));
        assert_eq!(palette.foreground, Rgb(0xA0, 0xB0, 0xC0));
    }

    #[test]
    fn test_missing_file() {
        let err = BackgroundConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(BackgroundConfig::load_or_default(None).is_ok());
    }
}
