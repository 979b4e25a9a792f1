use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use engine::layout::clamp_scale;
use engine::scene::GameId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnakeSettings {
    pub grid_size: u32,
    pub speed_ms: u64,
    pub allow_180: bool,
    pub wrap_walls: bool,
    pub die_on_self_collision: bool,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: 15,
            speed_ms: 120,
            allow_180: false,
            wrap_walls: false,
            die_on_self_collision: true,
        }
    }
}

impl SnakeSettings {
    pub fn clamp(mut self) -> Self {
        self.grid_size = self.grid_size.clamp(8, 40);
        self.speed_ms = self.speed_ms.clamp(30, 2000);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TetrisSettings {
    pub speed_ms: u64,
    pub start_level: u32,
}

impl Default for TetrisSettings {
    fn default() -> Self {
        Self {
            speed_ms: 500,
            start_level: 1,
        }
    }
}

impl TetrisSettings {
    pub fn clamp(mut self) -> Self {
        self.speed_ms = self.speed_ms.clamp(30, 2000);
        self.start_level = self.start_level.clamp(1, 15);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub snake: SnakeSettings,
    #[serde(default)]
    pub tetris: TetrisSettings,
    #[serde(default = "default_display_scale")]
    pub display_scale_percent: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            snake: SnakeSettings::default(),
            tetris: TetrisSettings::default(),
            display_scale_percent: default_display_scale(),
        }
    }
}

impl PlayerSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.snake = self.snake.clamp();
        self.tetris = self.tetris.clamp();
        self.display_scale_percent = clamp_scale(self.display_scale_percent);
        self
    }

    /// Body of the start request's `config` field for the given game.
    pub fn start_config(&self, game: GameId) -> Value {
        match game {
            GameId::Snake => json!({
                "grid_w": self.snake.grid_size,
                "grid_h": self.snake.grid_size,
                "allow_180": self.snake.allow_180,
                "wrap_walls": self.snake.wrap_walls,
                "die_on_self_collision": self.snake.die_on_self_collision,
            }),
            GameId::Tetris => json!({
                "grid_w": 10,
                "grid_h": 20,
                "start_level": self.tetris.start_level,
            }),
            GameId::Doudizhu => json!({}),
        }
    }

    /// Tick period for the game's scheduler.
    pub fn speed(&self, game: GameId) -> Duration {
        let ms = match game {
            GameId::Tetris => self.tetris.speed_ms,
            _ => self.snake.speed_ms,
        };
        Duration::from_millis(ms)
    }
}

fn default_version() -> u32 {
    1
}

fn default_display_scale() -> u32 {
    100
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("PLAYGROUND_SETTINGS_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("playground");
        path.push("settings.json");
        Self { path }
    }

    pub fn load(&self) -> PlayerSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return PlayerSettings::default();
        };
        serde_json::from_slice::<PlayerSettings>(&bytes)
            .map(PlayerSettings::sanitized)
            .unwrap_or_else(|_| PlayerSettings::default())
    }

    pub fn save(&self, settings: &PlayerSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
