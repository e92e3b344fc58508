//! Configuration contracts (CONFIG-001 through CONFIG-004)
//!
//! Priority: CLI flags > env vars > project config > user config > defaults

use crate::common::*;

/// CONTRACT CONFIG-001: project config beats user config
#[test]
fn contract_project_config_overrides_user_config() {
    let env = TestEnv::builder()
        .with_user_config("[ledger]\npath = \"user.json\"\n")
        .with_project_config("[ledger]\npath = \"project.json\"\n")
        .build();

    let result = env.run(APPLY_ARGS);

    assert!(result.success, "apply failed: {}", result.stderr);
    assert!(env.project_path("project.json").exists());
    assert!(!env.project_path("user.json").exists());
}

/// CONTRACT CONFIG-002: user config applies when there is no project config
#[test]
fn contract_user_config_is_fallback() {
    let env = TestEnv::builder()
        .with_user_config(STRICT_POLICY)
        .build();

    assert!(env.run(APPLY_ARGS).success);
    let result = env.run(&["repay", LOAN_ID, "5000"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("OVERPAYMENT"), "{}", result.stderr);
}

/// CONTRACT CONFIG-003: environment beats config files
#[test]
fn contract_env_overrides_project_config() {
    let env = TestEnv::builder()
        .with_project_config("[ledger]\npath = \"project.json\"\n")
        .build();

    let result = env.run_with_env(APPLY_ARGS, &[("LOAN_LEDGER_PATH", "env.json")]);

    assert!(result.success, "apply failed: {}", result.stderr);
    assert!(env.project_path("env.json").exists());
    assert!(!env.project_path("project.json").exists());
}

/// CONTRACT CONFIG-004: CLI flags beat the environment
#[test]
fn contract_cli_flag_overrides_env() {
    let env = TestEnv::builder().build();

    let mut args = APPLY_ARGS.to_vec();
    args.extend(["--ledger", "flag.json"]);
    let result = env.run_with_env(&args, &[("LOAN_LEDGER_PATH", "env.json")]);

    assert!(result.success, "apply failed: {}", result.stderr);
    assert!(env.project_path("flag.json").exists());
    assert!(!env.project_path("env.json").exists());
}

/// Unknown keys warn but do not fail
#[test]
fn contract_unknown_config_keys_warn() {
    let env = TestEnv::builder()
        .with_project_config("[policy]\nstrict_aproval = true\n")
        .build();

    let result = env.run(APPLY_ARGS);

    assert!(result.success, "apply failed: {}", result.stderr);
    assert!(result.stderr.contains("strict_aproval"), "{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'strict_approval'"));
}

/// Unparsable config is a usage failure
#[test]
fn contract_invalid_config_exits_with_usage_code() {
    let env = TestEnv::builder()
        .with_project_config("[ledger]\nbackend = \"tape\"\n")
        .build();

    let result = env.run(&["--json", "query", LOAN_ID]);

    assert_eq!(result.exit_code, 2);
    assert_eq!(result.last_json()["code"], "CONFIG_ERROR");
}
