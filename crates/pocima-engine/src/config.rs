//! Engine configuration.
//!
//! Names and limits for the demo containers, the recipe source and the log
//! filter. Loaded from `pocima.toml`; missing or broken files fall back to
//! defaults.

use pocima_gameplay::IngredientPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "pocima.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default `tracing` filter directive (overridden by `RUST_LOG`)
    pub log_filter: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,

    // === Bag ===
    /// Bag name
    pub bag_name: String,
    /// Maximum total weight the bag holds
    pub bag_capacity: i64,

    // === Vessel ===
    /// Vessel name
    pub vessel_name: String,
    /// Maximum ingredients per recipe
    pub vessel_slot_limit: i64,
    /// Treatment of ingredients outside the bound recipe
    pub ingredient_policy: IngredientPolicy,

    // === Data ===
    /// Recipe file or directory (None = built-in recipe only)
    pub recipe_path: Option<PathBuf>,
    /// Event bus capacity
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_filter: "pocima=info".to_string(),
            log_json: false,
            bag_name: "Mochila".to_string(),
            bag_capacity: 50,
            vessel_name: "Caldero mediano".to_string(),
            vessel_slot_limit: 3,
            ingredient_policy: IngredientPolicy::Permissive,
            recipe_path: None,
            event_capacity: 256,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `pocima.toml` in the working directory.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                info!("Loaded config from {}", path.display());
                config.validate();
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values that would make the demo meaningless.
    ///
    /// Negative capacities are left alone: they are valid, if useless,
    /// container limits.
    pub fn validate(&mut self) {
        self.event_capacity = self.event_capacity.clamp(1, 65_536);
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
    }
}
