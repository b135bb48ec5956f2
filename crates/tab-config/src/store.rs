//! libSQL store configuration.

use serde::{Deserialize, Serialize};

/// In-memory database path understood by libSQL.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    IN_MEMORY.to_string()
}

/// Unquoted identifiers fold to upper case unless disabled.
const fn default_fold_identifiers() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file path, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Upper-case unquoted table and column identifiers.
    #[serde(default = "default_fold_identifiers")]
    pub fold_identifiers: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            fold_identifiers: default_fold_identifiers(),
        }
    }
}

impl StoreConfig {
    /// Whether the store lives only for the lifetime of the process.
    pub fn is_in_memory(&self) -> bool {
        self.path.is_empty() || self.path == IN_MEMORY
    }
}
