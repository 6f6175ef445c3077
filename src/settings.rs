//! Game settings: defaults, `setting[key]="value"` files, and validation.

use crate::item::NormalType;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Board and collector configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    /// Columns.
    pub board_size_x: usize,
    /// Rows.
    pub board_size_y: usize,
    /// Shortest run that counts as a match.
    pub matches_min: usize,
    /// Collector lane capacity.
    pub bottom_cell_count: usize,
    /// Number of normal kinds in play (2..=7).
    /// One kind would refill into a fresh match forever.
    pub type_count: usize,
    /// Reshuffles a cascade may attempt before giving up with no moves.
    pub max_reshuffles: usize,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size_x: 8,
            board_size_y: 8,
            matches_min: 3,
            bottom_cell_count: 7,
            type_count: NormalType::ALL.len(),
            max_reshuffles: 16,
        }
    }
}

impl GameSettings {
    /// Load from a settings file. Falls back to defaults if `path` is None or missing.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        let settings = Self::from_map(&parse_settings_file(&s))?;
        settings.validate()?;
        Ok(settings)
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let get = |key: &str, fallback: usize| -> Result<usize, SettingsError> {
            match map.get(key) {
                None => Ok(fallback),
                Some(v) => v.parse().map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    value: v.clone(),
                }),
            }
        };
        Ok(Self {
            board_size_x: get("board_size_x", defaults.board_size_x)?,
            board_size_y: get("board_size_y", defaults.board_size_y)?,
            matches_min: get("matches_min", defaults.matches_min)?,
            bottom_cell_count: get("bottom_cell_count", defaults.bottom_cell_count)?,
            type_count: get("type_count", defaults.type_count)?,
            max_reshuffles: get("max_reshuffles", defaults.max_reshuffles)?,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.board_size_x == 0 || self.board_size_y == 0 {
            return Err(SettingsError::Invalid("board must have at least one cell".into()));
        }
        if self.matches_min < 2 {
            return Err(SettingsError::Invalid("matches_min must be at least 2".into()));
        }
        if self.bottom_cell_count == 0 {
            return Err(SettingsError::Invalid("bottom_cell_count must be positive".into()));
        }
        if !(2..=NormalType::ALL.len()).contains(&self.type_count) {
            return Err(SettingsError::Invalid(format!(
                "type_count must be within 2..={}",
                NormalType::ALL.len()
            )));
        }
        Ok(())
    }

    /// Kinds in play.
    pub fn types(&self) -> &'static [NormalType] {
        NormalType::first(self.type_count)
    }

    pub fn cell_count(&self) -> usize {
        self.board_size_x * self.board_size_y
    }
}

/// Parse `setting[key]="value"` lines into a key -> value map.
fn parse_settings_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("setting[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'').trim();
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}
