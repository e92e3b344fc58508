//! Test environment builder for isolated loan-ledger runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use loan_ledger::{FileLedger, LoanRecord};
use tempfile::TempDir;

/// Variables that would leak host configuration into a run
const SCRUBBED_VARS: &[&str] = &[
    "LOAN_LEDGER_PATH",
    "LOAN_LEDGER_BACKEND",
    "LOAN_LEDGER_VERBOSITY",
    "LOAN_LEDGER_FORMAT",
    "LOAN_LEDGER_STRICT_APPROVAL",
    "LOAN_LEDGER_REJECT_OVERPAYMENT",
    "LOAN_LEDGER_REJECT_NON_POSITIVE_REPAYMENT",
];

/// Result of running the loan-ledger binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {line}"))
            })
            .collect()
    }

    /// The final JSON line (the result or error object)
    pub fn last_json(&self) -> serde_json::Value {
        self.json_lines()
            .pop()
            .unwrap_or_else(|| panic!("no JSON on stdout; stderr:\n{}", self.stderr))
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Default file ledger location for this project
    pub fn ledger_path(&self) -> PathBuf {
        self.project_path(".loan-ledger/world-state.json")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"));
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute loan-ledger");
        output_to_result(output)
    }

    /// Read a committed record straight from the file ledger
    pub fn stored_record(&self, loan_id: &str) -> Option<LoanRecord> {
        let snapshot = FileLedger::new(self.ledger_path())
            .snapshot()
            .expect("ledger snapshot");
        snapshot
            .get(loan_id)
            .map(|bytes| LoanRecord::from_json(loan_id, bytes).expect("stored record decodes"))
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for [`TestEnv`]
#[derive(Default)]
pub struct TestEnvBuilder {
    project_config: Option<String>,
    user_config: Option<String>,
}

impl TestEnvBuilder {
    /// Write `./loan-ledger.toml`
    pub fn with_project_config(mut self, content: &str) -> Self {
        self.project_config = Some(content.to_string());
        self
    }

    /// Write `$XDG_CONFIG_HOME/loan-ledger/config.toml`
    pub fn with_user_config(mut self, content: &str) -> Self {
        self.user_config = Some(content.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().expect("project tempdir");
        let home_dir = tempfile::tempdir().expect("home tempdir");

        if let Some(content) = self.project_config {
            fs::write(project_root.path().join("loan-ledger.toml"), content)
                .expect("write project config");
        }
        if let Some(content) = self.user_config {
            let dir = home_dir.path().join(".config").join("loan-ledger");
            fs::create_dir_all(&dir).expect("create user config dir");
            fs::write(dir.join("config.toml"), content).expect("write user config");
        }

        TestEnv {
            project_root,
            home_dir,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_loan-ledger")),
        }
    }
}
