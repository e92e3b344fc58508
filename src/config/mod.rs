//! Configuration module for loan-ledger
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LOAN_LEDGER_*)
//! 3. Project config (./loan-ledger.toml)
//! 4. User config (<config_dir>/loan-ledger/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{apply_overrides, ConfigWarning, ENV_PREFIX, PROJECT_CONFIG_FILE};
pub use types::{
    Config, LedgerBackend, LedgerConfig, OutputConfig, OutputFormat, Verbosity,
    DEFAULT_LEDGER_PATH,
};
