use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Key for the developer-mode logging flag.
pub const DEV_MODE: &str = "devMode";

/// Typed settings registry backed by the per-user (client-scoped) settings
/// file. Settings must be registered with a default before they can be read;
/// the stored file only ever overrides registered keys.
pub struct Settings {
    registered: HashMap<String, Value>,
    stored: HashMap<String, Value>,
}

impl Settings {
    /// Load the client-scoped settings store from the platform config
    /// directory (`<config>/tableforge/settings.json`).
    pub fn load() -> Self {
        let path = dirs::config_dir().map(|dir| dir.join("tableforge").join("settings.json"));
        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Self {
        let stored = path.map(read_store).unwrap_or_default();
        Settings {
            registered: HashMap::new(),
            stored,
        }
    }

    /// Register a boolean setting with its default value. Registering the
    /// same key twice keeps the first registration.
    pub fn register_bool(&mut self, key: &str, default: bool) {
        self.registered
            .entry(key.to_string())
            .or_insert(Value::Bool(default));
    }

    /// Read a boolean setting. The key must have been registered first.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let Some(default) = self.registered.get(key) else {
            bail!("setting '{key}' has not been registered");
        };
        match self.stored.get(key).unwrap_or(default) {
            Value::Bool(value) => Ok(*value),
            other => bail!("setting '{key}' is not a boolean: {other}"),
        }
    }
}

fn read_store(path: &Path) -> HashMap<String, Value> {
    let Ok(text) = fs::read_to_string(path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&text) {
        Ok(map) => map,
        Err(e) => {
            eprintln!(
                "⚠️  Warning: could not parse settings file {}: {}",
                path.display(),
                e
            );
            HashMap::new()
        }
    }
}

/// Register every setting tableforge owns. Runs once at startup.
pub fn register_settings(settings: &mut Settings) {
    settings.register_bool(DEV_MODE, false);
}

/// Developer-mode logger. Messages go to stderr, and only when enabled.
#[derive(Debug, Clone, Copy)]
pub struct DevLog {
    enabled: bool,
}

impl DevLog {
    pub fn new(enabled: bool) -> Self {
        DevLog { enabled }
    }

    pub fn log(&self, message: impl AsRef<str>) {
        if self.enabled {
            eprintln!("tableforge | {}", message.as_ref());
        }
    }
}
