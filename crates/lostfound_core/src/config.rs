//! Store configuration shared by FFI and CLI surfaces.

/// Default slot name, shared with existing browser snapshots.
pub const DEFAULT_SLOT_KEY: &str = "campusLostFound";

/// Environment variable overriding the slot name.
pub const SLOT_KEY_ENV: &str = "LOSTFOUND_SLOT";

/// Where the record snapshot lives inside the key-value storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub slot_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds a config from an optional override, ignoring blank values.
    pub fn with_slot_key(slot_key: Option<&str>) -> Self {
        match slot_key.map(str::trim) {
            Some(key) if !key.is_empty() => Self {
                slot_key: key.to_string(),
            },
            _ => Self::default(),
        }
    }

    /// Reads `LOSTFOUND_SLOT`, falling back to the default slot.
    pub fn from_env() -> Self {
        Self::with_slot_key(std::env::var(SLOT_KEY_ENV).ok().as_deref())
    }
}
