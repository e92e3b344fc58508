//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoanError, LoanResult};

use super::types::{Config, OutputFormat, Verbosity};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "loan-ledger.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "LOAN_LEDGER_";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> LoanResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| LoanError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config files in priority order: project first, then user
pub fn candidate_paths(project_root: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(root) = project_root {
        paths.push(root.join(PROJECT_CONFIG_FILE));
    }
    if let Some(user_config_dir) = user_config_dir() {
        paths.push(user_config_dir.join("loan-ledger").join("config.toml"));
    }
    paths
}

/// First existing config file wins; env overrides apply on top
pub fn discover(project_root: Option<&Path>) -> LoanResult<(Config, Vec<ConfigWarning>)> {
    for path in candidate_paths(project_root) {
        if path.exists() {
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }
    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (LOAN_LEDGER_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(format!("{ENV_PREFIX}{name}")).ok())
}

/// Apply overrides from an arbitrary lookup keyed by the unprefixed name
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(path) = lookup("PATH").filter(|p| !p.is_empty()) {
        config.ledger.path = PathBuf::from(path);
    }

    // Unknown backends keep the configured one
    if let Some(backend) = lookup("BACKEND") {
        if let Ok(backend) = backend.parse() {
            config.ledger.backend = backend;
        }
    }

    if let Some(verbosity) = lookup("VERBOSITY") {
        config.output.verbosity = Verbosity::parse_lenient(&verbosity);
    }

    if let Some(format) = lookup("FORMAT") {
        config.output.format = match format.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
    }

    if let Some(val) = lookup("STRICT_APPROVAL") {
        config.policy.strict_approval = parse_flag(&val);
    }
    if let Some(val) = lookup("REJECT_OVERPAYMENT") {
        config.policy.reject_overpayment = parse_flag(&val);
    }
    if let Some(val) = lookup("REJECT_NON_POSITIVE_REPAYMENT") {
        config.policy.reject_non_positive_repayment = parse_flag(&val);
    }

    config
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    val != "false" && val != "0" && !val.is_empty()
}

/// XDG config directory, falling back to the platform default
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "ledger",
        "backend",
        "path",
        "policy",
        "strict_approval",
        "reject_overpayment",
        "reject_non_positive_repayment",
        "output",
        "verbosity",
        "format",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
