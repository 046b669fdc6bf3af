use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "snake_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Base tick interval of each difficulty, in milliseconds.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct DifficultyPresets {
    pub easy_ms: u64,
    pub normal_ms: u64,
    pub hard_ms: u64,
}

impl Default for DifficultyPresets {
    fn default() -> Self {
        DifficultyPresets {
            easy_ms: 240,
            normal_ms: 180,
            hard_ms: 120,
        }
    }
}

impl DifficultyPresets {
    pub fn base_interval(&self, difficulty: Difficulty) -> Duration {
        let ms = match difficulty {
            Difficulty::Easy => self.easy_ms,
            Difficulty::Normal => self.normal_ms,
            Difficulty::Hard => self.hard_ms,
        };
        Duration::from_millis(ms)
    }
}

/// How the tick interval shrinks as the score climbs.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SpeedSettings {
    pub min_interval_ms: u64,
    pub step_ms: u64,
    pub score_per_level: u32,
    pub level_cap: u32,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        SpeedSettings {
            min_interval_ms: 40,
            step_ms: 5,
            score_per_level: 5,
            level_cap: 30,
        }
    }
}

/// Stepwise speed-up bound to one difficulty's base interval.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct SpeedPolicy {
    base: Duration,
    settings: SpeedSettings,
}

impl SpeedPolicy {
    pub fn new(base: Duration, settings: SpeedSettings) -> Self {
        SpeedPolicy { base, settings }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn level(&self, score: u32) -> u32 {
        (score / self.settings.score_per_level).min(self.settings.level_cap)
    }

    pub fn interval_for(&self, score: u32) -> Duration {
        let min = Duration::from_millis(self.settings.min_interval_ms);
        let cut = Duration::from_millis(
            self.settings
                .step_ms
                .saturating_mul(u64::from(self.level(score))),
        );
        self.base.saturating_sub(cut).max(min)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: i16,
    pub rows: i16,
    pub cell_size: f32,
    pub stats_height: f32,
    pub initial_length: usize,
    pub food_reward: u32,
    pub countdown_from: u32,
    pub countdown_interval_ms: u64,
    pub difficulties: DifficultyPresets,
    pub speed: SpeedSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cols: 40,
            rows: 25,
            cell_size: 25.0,
            stats_height: 50.0,
            initial_length: 3,
            food_reward: 5,
            countdown_from: 3,
            countdown_interval_ms: 1000,
            difficulties: DifficultyPresets::default(),
            speed: SpeedSettings::default(),
        }
    }
}

impl GameConfig {
    /// Loads `path` if it exists, otherwise falls back to defaults. The
    /// boolean reports whether a file was actually read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<(Self, bool), ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok((GameConfig::default(), false));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let config = Self::from_json(&contents)?;
        Ok((config, true))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would let the game reach a degenerate state:
    /// no room for the starting snake, or no free cell left for food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols <= 0 || self.rows <= 0 {
            return Err(invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.initial_length == 0 {
            return Err(invalid("initial_length must be at least 1"));
        }
        // Head sits at cols / 2 and the body trails left to x = 0 at most.
        if self.initial_length > (self.cols / 2) as usize + 1 {
            return Err(invalid(format!(
                "initial_length {} does not fit in {} columns",
                self.initial_length, self.cols
            )));
        }
        if self.cell_count() <= self.initial_length {
            return Err(invalid("grid leaves no free cell for food"));
        }
        if self.food_reward == 0 {
            return Err(invalid("food_reward must be positive"));
        }
        if self.countdown_interval_ms == 0 {
            return Err(invalid("countdown_interval_ms must be positive"));
        }
        if self.speed.min_interval_ms == 0 {
            return Err(invalid("speed.min_interval_ms must be positive"));
        }
        if self.speed.score_per_level == 0 {
            return Err(invalid("speed.score_per_level must be positive"));
        }
        if self
            .speed
            .step_ms
            .checked_mul(u64::from(self.speed.level_cap))
            .is_none()
        {
            return Err(invalid(format!(
                "speed.step_ms {} times level_cap {} overflows",
                self.speed.step_ms, self.speed.level_cap
            )));
        }
        for difficulty in Difficulty::ALL {
            let base = self.difficulties.base_interval(difficulty);
            if base < Duration::from_millis(self.speed.min_interval_ms) {
                return Err(invalid(format!(
                    "{} interval {:?} is below the minimum interval",
                    difficulty.name(),
                    base
                )));
            }
        }
        if self.cell_size <= 0.0 {
            return Err(invalid("cell_size must be positive"));
        }
        if self.stats_height < 0.0 {
            return Err(invalid("stats_height cannot be negative"));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn speed_policy(&self, difficulty: Difficulty) -> SpeedPolicy {
        SpeedPolicy::new(self.difficulties.base_interval(difficulty), self.speed)
    }

    pub fn board_width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    pub fn board_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = GameConfig::from_json(r#"{ "cols": 10, "rows": 10 }"#).unwrap();
        assert_eq!(config.cols, 10);
        assert_eq!(config.rows, 10);
        assert_eq!(config.food_reward, 5);
        assert_eq!(config.difficulties, DifficultyPresets::default());
    }

    #[test]
    fn nested_sections_can_be_partial() {
        let config = GameConfig::from_json(r#"{ "speed": { "step_ms": 10 } }"#).unwrap();
        assert_eq!(config.speed.step_ms, 10);
        assert_eq!(config.speed.min_interval_ms, 40);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{ cols: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn board_without_a_free_cell_is_rejected() {
        let config = GameConfig {
            cols: 3,
            rows: 1,
            initial_length: 2,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = GameConfig {
            cols: 2,
            rows: 1,
            initial_length: 2,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn snake_longer_than_half_the_board_is_rejected() {
        let config = GameConfig {
            cols: 6,
            rows: 6,
            initial_length: 5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn presets_below_minimum_interval_are_rejected() {
        let mut config = GameConfig::default();
        config.difficulties.hard_ms = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (config, from_file) =
            GameConfig::load_or_default("definitely/not/here/snake_config.json").unwrap();
        assert!(!from_file);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn speed_steps_down_per_level_until_the_floor() {
        let policy = GameConfig::default().speed_policy(Difficulty::Normal);
        assert_eq!(policy.interval_for(0), Duration::from_millis(180));
        assert_eq!(policy.interval_for(4), Duration::from_millis(180));
        assert_eq!(policy.interval_for(5), Duration::from_millis(175));
        assert_eq!(policy.interval_for(50), Duration::from_millis(130));
        // Level is capped at 30: 180 - 150 = 30, clamped up to 40.
        assert_eq!(policy.level(1000), 30);
        assert_eq!(policy.interval_for(1000), Duration::from_millis(40));
    }

    #[test]
    fn oversized_speed_step_is_rejected() {
        let err = GameConfig::from_json(r#"{ "speed": { "step_ms": 9223372036854775808 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn huge_speed_step_clamps_to_the_floor() {
        let settings = SpeedSettings {
            step_ms: u64::MAX,
            ..SpeedSettings::default()
        };
        let policy = SpeedPolicy::new(Duration::from_millis(180), settings);
        assert_eq!(policy.interval_for(10), Duration::from_millis(40));
    }

    #[test]
    fn easy_never_drops_below_its_floor() {
        let policy = GameConfig::default().speed_policy(Difficulty::Easy);
        assert_eq!(policy.interval_for(150), Duration::from_millis(90));
        assert_eq!(policy.interval_for(10_000), Duration::from_millis(90));
    }
}
