//! Configuration loading for `jte.toml`.
//!
//! Recognized tables (all optional, unknown fields ignored):
//!
//! ```toml
//! [input]
//! leader = "\\"        # key that prefixes pane-navigation bindings
//!
//! [scroll.margin]
//! vertical = 0         # rows kept between cursor and pane edge
//!
//! [gutter]
//! line_numbers = true
//! ```
//!
//! Loading is tolerant: a missing file or a parse error yields defaults so the
//! editor always starts. The raw vertical margin is kept and clamped against
//! the pane height at application time by `Config::apply_context`.

use anyhow::Result;
use core_events::{Key, parse_keys};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const DEFAULT_LEADER: char = '\\';

/// Viewport facts the margin clamp depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_rows: u16,
    /// Rows not available to text (status line, command window).
    pub reserved_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_rows: u16, reserved_rows: u16) -> Self {
        Self {
            viewport_rows,
            reserved_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.reserved_rows)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MarginConfig {
    #[serde(default)]
    pub vertical: u16,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScrollConfig {
    #[serde(default)]
    pub margin: MarginConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_leader")]
    pub leader: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            leader: Self::default_leader(),
        }
    }
}

impl InputConfig {
    fn default_leader() -> String {
        DEFAULT_LEADER.to_string()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GutterConfig {
    #[serde(default = "GutterConfig::default_line_numbers")]
    pub line_numbers: bool,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            line_numbers: Self::default_line_numbers(),
        }
    }
}

impl GutterConfig {
    const fn default_line_numbers() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub gutter: GutterConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
    pub effective_vertical_margin: u16,
}

/// `./jte.toml` if present, else `<config_dir>/jte/jte.toml`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("jte.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("jte").join("jte.toml");
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                effective_vertical_margin: 0,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Leader key. Accepts one literal character or one bracketed key name
    /// (`"<Space>"`, `"<C-w>"`); anything else falls back to `\`.
    pub fn leader(&self) -> Key {
        let keys = parse_keys(&self.file.input.leader);
        match keys.as_slice() {
            [key] => *key,
            _ => {
                warn!(target: "config", leader = %self.file.input.leader, "leader_invalid_using_default");
                Key::char(DEFAULT_LEADER)
            }
        }
    }

    pub fn line_numbers(&self) -> bool {
        self.file.gutter.line_numbers
    }

    /// Clamp the configured margin to `(text_rows - 2) / 2` (0 for tiny
    /// viewports) and store it. Returns the effective value.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.scroll.margin.vertical;
        let text_rows = ctx.text_rows();
        let max = if text_rows <= 3 {
            0
        } else {
            text_rows.saturating_sub(2) / 2
        };
        let clamped = raw.min(max);
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_rows,
                viewport_rows = ctx.viewport_rows,
                "scroll_margin_vertical_clamped"
            );
        }
        self.effective_vertical_margin = clamped;
        clamped
    }

    /// Re-clamp after a resize. `Some(new)` when the effective value changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_vertical_margin;
        let current = self.apply_context(ctx);
        (current != prev).then_some(current)
    }
}
