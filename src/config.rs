use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::{Result, TyperError};
use crate::session::Viewport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub typed: String,
    pub error: String,
    pub untyped: String,
    pub graph: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            typed: "white".to_string(),
            error: "red".to_string(),
            untyped: "gray".to_string(),
            graph: "magenta".to_string(),
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        warn!(value, "unknown theme color, using default");
        fallback
    })
}

impl Theme {
    pub fn typed_color(&self) -> Color {
        parse_color(&self.typed, Color::White)
    }

    pub fn error_color(&self) -> Color {
        parse_color(&self.error, Color::Red)
    }

    pub fn untyped_color(&self) -> Color {
        parse_color(&self.untyped, Color::Gray)
    }

    pub fn graph_color(&self) -> Color {
        parse_color(&self.graph, Color::Magenta)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub max_width: u16,
    pub max_height: u16,
    pub graph_height: u16,
    pub default_words: usize,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: 80,
            max_height: 40,
            graph_height: 8,
            default_words: 20,
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.max_width, self.max_height)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("typer_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(%err, path = %self.path.display(), "malformed config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        let io_err = |source: std::io::Error| TyperError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(io_err)
    }
}
