//! Game configuration: an optional JSON file plus environment overrides.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `BLOCKFALL_CONFIG` | path of a JSON config file, loaded first |
//! | `BLOCKFALL_SEED` | piece generator seed |
//! | `BLOCKFALL_PREVIEW` | preview depth |
//! | `BLOCKFALL_SCORING` | `classic` or `modern` |
//! | `BLOCKFALL_LOG` | log file path; logging is off without one |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Context, Result};
use serde::{de, Deserialize, Deserializer};

use crate::core::{BoardConfig, ScoringRule};
use crate::input::{parse_key, KeyMap};
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_PREVIEW_DEPTH, MAX_BOARD_SIDE, MIN_BOARD_HEIGHT,
    MIN_BOARD_WIDTH,
};

pub const CONFIG_VAR: &str = "BLOCKFALL_CONFIG";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const PREVIEW_VAR: &str = "BLOCKFALL_PREVIEW";
pub const SCORING_VAR: &str = "BLOCKFALL_SCORING";
pub const LOG_VAR: &str = "BLOCKFALL_LOG";


/// Key names for each command, parsed with [`parse_key`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub rotate: String,
    pub soft_drop: String,
    pub pause: String,
    pub resume: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "left".to_string(),
            right: "right".to_string(),
            rotate: "up".to_string(),
            soft_drop: "down".to_string(),
            pause: "space".to_string(),
            resume: "enter".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn to_key_map(&self) -> Result<KeyMap> {
        use crate::types::Command;

        let bindings = [
            (Command::Left, &self.left),
            (Command::Right, &self.right),
            (Command::Rotate, &self.rotate),
            (Command::SoftDrop, &self.soft_drop),
            (Command::Pause, &self.pause),
            (Command::Resume, &self.resume),
        ];

        let mut builder = KeyMap::builder();
        for (command, name) in bindings {
            let key = parse_key(name).with_context(|| format!("key for {command}"))?;
            builder = builder.assign(command, key)?;
        }
        Ok(builder.build()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub preview_depth: usize,
    /// Generator seed; `None` derives one from the clock
    pub seed: Option<u32>,
    #[serde(deserialize_with = "deserialize_scoring")]
    pub scoring: ScoringRule,
    pub keys: KeyBindings,
    pub log_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            preview_depth: DEFAULT_PREVIEW_DEPTH,
            seed: None,
            scoring: ScoringRule::default(),
            keys: KeyBindings::default(),
            log_file: None,
            log_filter: "blockfall=info".to_string(),
        }
    }
}

fn deserialize_scoring<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ScoringRule, D::Error> {
    let name = String::deserialize(deserializer)?;
    ScoringRule::from_str(&name)
        .ok_or_else(|| de::Error::custom(format!("unknown scoring rule {name:?}")))
}

impl GameConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_VAR) {
            Some(path) => Self::load(Path::new(path.trim()))?,
            None => Self::default(),
        };

        if let Some(seed) = lookup(SEED_VAR) {
            let seed = seed
                .trim()
                .parse()
                .with_context(|| format!("{SEED_VAR}={seed:?} is not a valid seed"))?;
            config.seed = Some(seed);
        }

        if let Some(depth) = lookup(PREVIEW_VAR) {
            config.preview_depth = depth
                .trim()
                .parse()
                .with_context(|| format!("{PREVIEW_VAR}={depth:?} is not a valid preview depth"))?;
        }

        if let Some(name) = lookup(SCORING_VAR) {
            config.scoring = ScoringRule::from_str(name.trim())
                .with_context(|| format!("{SCORING_VAR}={name:?} is not a scoring rule"))?;
        }

        if let Some(path) = lookup(LOG_VAR) {
            let path = path.trim();
            if !path.is_empty() {
                config.log_file = Some(PathBuf::from(path));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_BOARD_WIDTH..=MAX_BOARD_SIDE).contains(&self.width),
            "board width {} must be between {MIN_BOARD_WIDTH} and {MAX_BOARD_SIDE}",
            self.width
        );
        ensure!(
            (MIN_BOARD_HEIGHT..=MAX_BOARD_SIDE).contains(&self.height),
            "board height {} must be between {MIN_BOARD_HEIGHT} and {MAX_BOARD_SIDE}",
            self.height
        );
        ensure!(self.preview_depth >= 1, "preview depth must be at least 1");
        self.keys.to_key_map().context("invalid key bindings")?;
        Ok(())
    }

    pub fn board(&self) -> BoardConfig {
        BoardConfig {
            width: self.width,
            height: self.height,
            preview_depth: self.preview_depth,
        }
    }

    pub fn key_map(&self) -> Result<KeyMap> {
        self.keys.to_key_map()
    }

    /// The configured seed, or one taken from the wall clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.subsec_nanos() ^ elapsed.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
