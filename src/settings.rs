//! Round tunables chosen in the options menu
//!
//! Loaded from JSON by the native binary; never written back.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which tunable an options-menu action adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    PlayerSpeed,
    EnemyCount,
    MaxBombs,
    BlastRange,
}

impl OptionKind {
    pub const ALL: [OptionKind; 4] = [
        OptionKind::PlayerSpeed,
        OptionKind::EnemyCount,
        OptionKind::MaxBombs,
        OptionKind::BlastRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::PlayerSpeed => "Player speed",
            OptionKind::EnemyCount => "Enemies",
            OptionKind::MaxBombs => "Max bombs",
            OptionKind::BlastRange => "Blast range",
        }
    }

    /// Inclusive range of valid values
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            OptionKind::PlayerSpeed | OptionKind::EnemyCount => (1, 9),
            OptionKind::MaxBombs | OptionKind::BlastRange => (1, 5),
        }
    }

    fn clamp(&self, value: u32) -> u32 {
        let (lo, hi) = self.bounds();
        value.clamp(lo, hi)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speed level 1-9
    pub player_speed_level: u32,
    /// Enemies spawned per round, 1-9
    pub enemy_count: u32,
    /// Bombs that may be armed at once, 1-5
    pub max_bombs: u32,
    /// Tiles reached along each blast ray, 1-5
    pub blast_range: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_speed_level: 5,
            enemy_count: 3,
            max_bombs: 1,
            blast_range: 1,
        }
    }
}

impl Settings {
    /// Parse settings JSON. Missing fields take defaults and out-of-range
    /// values are clamped.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_all();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Player speed in pixels per second
    pub fn player_speed(&self) -> f32 {
        100.0 + 25.0 * (self.player_speed_level as f32 - 1.0)
    }

    pub fn enemy_count(&self) -> u32 {
        self.enemy_count
    }

    pub fn max_bombs(&self) -> u32 {
        self.max_bombs
    }

    pub fn blast_range(&self) -> u32 {
        self.blast_range
    }

    pub fn get(&self, kind: OptionKind) -> u32 {
        match kind {
            OptionKind::PlayerSpeed => self.player_speed_level,
            OptionKind::EnemyCount => self.enemy_count,
            OptionKind::MaxBombs => self.max_bombs,
            OptionKind::BlastRange => self.blast_range,
        }
    }

    /// Set a tunable, clamped to its valid range
    pub fn set(&mut self, kind: OptionKind, value: u32) {
        let value = kind.clamp(value);
        match kind {
            OptionKind::PlayerSpeed => self.player_speed_level = value,
            OptionKind::EnemyCount => self.enemy_count = value,
            OptionKind::MaxBombs => self.max_bombs = value,
            OptionKind::BlastRange => self.blast_range = value,
        }
    }

    /// Step a tunable up or down, stopping at its bounds
    pub fn adjust(&mut self, kind: OptionKind, delta: i32) {
        let next = (self.get(kind) as i64 + delta as i64).max(0) as u32;
        self.set(kind, next);
        log::debug!("{} -> {}", kind.as_str(), self.get(kind));
    }

    fn clamp_all(&mut self) {
        for kind in OptionKind::ALL {
            let value = self.get(kind);
            if kind.clamp(value) != value {
                log::warn!("{} out of range ({value}); clamping", kind.as_str());
            }
            self.set(kind, value);
        }
    }
}
