//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hanzi-park/config.toml`. If missing on first run, a
//! commented-out default is generated so learners can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::board::BoardSettings;
use crate::core::dictionary::DEFAULT_LOOKUP_DELAY;
use crate::core::search::parse_search;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HanziConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub notices: NoticeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_character: Option<String>,
    pub dictionary_file: Option<String>,
    pub lookup_delay_ms: Option<u64>,
    pub loading_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    pub stroke_animation_speed: Option<f64>,
    pub delay_between_strokes_ms: Option<u64>,
    pub hint_after_misses: Option<u32>,
    pub revert_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NoticeConfig {
    pub mistake_ms: Option<u64>,
    pub success_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CHARACTER: char = '爱';
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(300);
pub const MIN_ANIMATION_SPEED: f64 = 0.05;
pub const MAX_ANIMATION_SPEED: f64 = 20.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub default_character: char,
    pub dictionary_file: Option<PathBuf>,
    pub lookup_delay: Duration,
    pub loading_delay: Duration,
    pub board: BoardSettings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            default_character: DEFAULT_CHARACTER,
            dictionary_file: None,
            lookup_delay: DEFAULT_LOOKUP_DELAY,
            loading_delay: DEFAULT_LOADING_DELAY,
            board: BoardSettings::default(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.hanzi-park/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hanzi-park"))
}

/// Returns the path to `~/.hanzi-park/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.hanzi-park/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HanziConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HanziConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HanziConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HanziConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<HanziConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HanziConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# hanzi-park configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_character = "爱"          # Or set HANZI_PARK_CHARACTER
# dictionary_file = "words.json"    # Extra entries, path relative to ~/.hanzi-park/
# lookup_delay_ms = 400
# loading_delay_ms = 300

# [board]
# stroke_animation_speed = 1.2
# delay_between_strokes_ms = 200
# hint_after_misses = 3             # 0 disables hints
# revert_delay_ms = 2500

# [notices]
# mistake_ms = 2000
# success_ms = 2500
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_character` is from the `--character` flag (None = not specified).
pub fn resolve(config: &HanziConfig, cli_character: Option<&str>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    // Default character: first valid of CLI → env → config, else the default
    let env_character = std::env::var("HANZI_PARK_CHARACTER").ok();
    let sources = [
        ("--character", cli_character),
        ("HANZI_PARK_CHARACTER", env_character.as_deref()),
        ("config default_character", config.general.default_character.as_deref()),
    ];
    let default_character = sources
        .into_iter()
        .filter_map(|(source, value)| match parse_search(value?) {
            Ok(Some(c)) => Some(c),
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring {}: {}", source, e);
                None
            }
        })
        .next()
        .unwrap_or(DEFAULT_CHARACTER);

    // Dictionary file: env → config, relative paths live under ~/.hanzi-park/
    let dictionary_file = std::env::var("HANZI_PARK_DICTIONARY")
        .ok()
        .or_else(|| config.general.dictionary_file.clone())
        .map(|file| resolve_data_path(&file));

    let mut board = defaults.board;
    if let Some(speed) = config.board.stroke_animation_speed {
        if speed.is_finite() && speed > 0.0 {
            let clamped = speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
            if clamped != speed {
                warn!("Clamping stroke_animation_speed {} to {}", speed, clamped);
            }
            board.options.stroke_animation_speed = clamped;
        } else {
            warn!("Ignoring non-positive stroke_animation_speed {}", speed);
        }
    }
    if let Some(ms) = config.board.delay_between_strokes_ms {
        board.options.delay_between_strokes = Duration::from_millis(ms);
    }
    if let Some(misses) = config.board.hint_after_misses {
        board.options.show_hint_after_misses = misses;
    }
    if let Some(ms) = config.board.revert_delay_ms {
        board.revert_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = config.notices.mistake_ms {
        board.mistake_notice = Duration::from_millis(ms);
    }
    if let Some(ms) = config.notices.success_ms {
        board.success_notice = Duration::from_millis(ms);
    }

    ResolvedConfig {
        default_character,
        dictionary_file,
        lookup_delay: config
            .general
            .lookup_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.lookup_delay),
        loading_delay: config
            .general
            .loading_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.loading_delay),
        board,
    }
}

/// Absolute paths are kept; relative ones are taken from `~/.hanzi-park/`.
fn resolve_data_path(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::DEFAULT_REVERT_DELAY;

    #[test]
    fn test_default_config_is_empty() {
        let config = HanziConfig::default();
        assert!(config.general.default_character.is_none());
        assert!(config.board.revert_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = HanziConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.lookup_delay, Duration::from_millis(400));
        assert_eq!(resolved.loading_delay, Duration::from_millis(300));
        assert_eq!(resolved.board.revert_delay, DEFAULT_REVERT_DELAY);
        assert_eq!(resolved.board.options.stroke_animation_speed, 1.2);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HanziConfig {
            general: GeneralConfig {
                lookup_delay_ms: Some(0),
                loading_delay_ms: Some(50),
                ..Default::default()
            },
            board: BoardConfig {
                stroke_animation_speed: Some(2.0),
                delay_between_strokes_ms: Some(100),
                hint_after_misses: Some(0),
                revert_delay_ms: Some(1000),
            },
            notices: NoticeConfig {
                mistake_ms: Some(500),
                success_ms: None,
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.lookup_delay, Duration::ZERO);
        assert_eq!(resolved.loading_delay, Duration::from_millis(50));
        assert_eq!(resolved.board.options.stroke_animation_speed, 2.0);
        assert_eq!(resolved.board.options.delay_between_strokes, Duration::from_millis(100));
        assert_eq!(resolved.board.options.show_hint_after_misses, 0);
        assert_eq!(resolved.board.revert_delay, Duration::from_millis(1000));
        assert_eq!(resolved.board.mistake_notice, Duration::from_millis(500));
        assert_eq!(resolved.board.success_notice, Duration::from_millis(2500));
    }

    #[test]
    fn test_resolve_cli_character_wins() {
        let config = HanziConfig {
            general: GeneralConfig {
                default_character: Some("中".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("猫"));
        assert_eq!(resolved.default_character, '猫');
    }

    #[test]
    fn test_resolve_rejects_non_chinese_default() {
        let resolved = resolve(&HanziConfig::default(), Some("cat"));
        assert_eq!(resolved.default_character, DEFAULT_CHARACTER);
    }

    #[test]
    fn test_resolve_ignores_bad_speed() {
        let config = HanziConfig {
            board: BoardConfig {
                stroke_animation_speed: Some(0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.board.options.stroke_animation_speed, 1.2);
    }

    #[test]
    fn test_resolve_skips_invalid_cli_character() {
        let config = HanziConfig {
            general: GeneralConfig {
                default_character: Some("水".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("cat"));
        if std::env::var("HANZI_PARK_CHARACTER").is_err() {
            assert_eq!(resolved.default_character, '水');
        }
    }

    #[test]
    fn test_resolve_blank_cli_character_falls_through() {
        let config = HanziConfig {
            general: GeneralConfig {
                default_character: Some("学".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("  "));
        if std::env::var("HANZI_PARK_CHARACTER").is_err() {
            assert_eq!(resolved.default_character, '学');
        }
    }

    #[test]
    fn test_resolve_clamps_extreme_speed() {
        let speed_of = |speed: f64| {
            let config = HanziConfig {
                board: BoardConfig {
                    stroke_animation_speed: Some(speed),
                    ..Default::default()
                },
                ..Default::default()
            };
            resolve(&config, None).board.options.stroke_animation_speed
        };
        assert_eq!(speed_of(1e-20), MIN_ANIMATION_SPEED);
        assert_eq!(speed_of(1e20), MAX_ANIMATION_SPEED);
        assert_eq!(speed_of(f64::NAN), 1.2);
        assert_eq!(speed_of(f64::INFINITY), 1.2);
    }

    #[test]
    fn test_absolute_dictionary_path_is_kept() {
        assert_eq!(resolve_data_path("/tmp/words.json"), PathBuf::from("/tmp/words.json"));
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
default_character = "水"
dictionary_file = "words.json"

[board]
stroke_animation_speed = 0.8
revert_delay_ms = 3000

[notices]
success_ms = 4000
"#;
        let config: HanziConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_character.as_deref(), Some("水"));
        assert_eq!(config.general.dictionary_file.as_deref(), Some("words.json"));
        assert_eq!(config.board.stroke_animation_speed, Some(0.8));
        assert_eq!(config.board.revert_delay_ms, Some(3000));
        assert_eq!(config.notices.success_ms, Some(4000));
        assert!(config.notices.mistake_ms.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[board]
hint_after_misses = 5
"#;
        let config: HanziConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.hint_after_misses, Some(5));
        assert!(config.general.default_character.is_none());
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("hanzi-park-config-{}.toml", std::process::id()));
        fs::write(&path, "[board\nrevert_delay_ms = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
