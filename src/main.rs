//! loan-ledger CLI
//!
//! Usage: loan-ledger [OPTIONS] <COMMAND>
//!
//! Commands:
//!   apply    Open a new loan in the Applied state
//!   approve  Set the status of an existing loan
//!   repay    Record a repayment against a loan
//!   query    Show the stored record of a loan
//!   invoke   Invoke a contract function by name

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use loan_ledger::config::{Config, ConfigWarning, OutputFormat};
use loan_ledger::domain::policies::ContractPolicy;
use loan_ledger::presentation::factory;
use loan_ledger::presentation::{create_renderer, Cli, Outcome};
use loan_ledger::{ContractFunction, LoanError, LoanResult};

/// Exit status for a rejected or failed invocation
const EXIT_FAILURE: i32 = 1;
/// Exit status for bad usage or configuration (matches clap)
const EXIT_USAGE: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    let config = match resolve_config(&cli, &cwd) {
        Ok((config, warnings)) => {
            print_warnings(&warnings);
            config
        }
        Err(e) => fail(&cli_format(&cli), &e),
    };

    let (function, args) = cli.command.invocation();
    let renderer = create_renderer(config.output.format);
    let router = factory::create_router(&config, factory::create_event_sink(&config));

    match run(&router, &config, &cwd, &function, args) {
        Ok(outcome) => {
            println!("{}", renderer.render(&outcome));
            Ok(())
        }
        Err(e) => fail(&config.output.format, &e),
    }
}

fn run(
    router: &loan_ledger::ContractRouter,
    config: &Config,
    cwd: &Path,
    function: &str,
    args: Vec<String>,
) -> LoanResult<Outcome> {
    let parsed: ContractFunction = function.parse()?;
    let payload = factory::execute(router, config, cwd, function, &args)?;
    Ok(Outcome::new(parsed, args, payload))
}

/// Config file, then env, then command-line flags
fn resolve_config(cli: &Cli, cwd: &Path) -> LoanResult<(Config, Vec<ConfigWarning>)> {
    let (mut config, warnings) = match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            (config.with_env_overrides(), warnings)
        }
        None => Config::discover(Some(cwd))?,
    };

    if let Some(path) = &cli.ledger {
        config.ledger.path = path.clone();
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }
    if cli.strict {
        config.policy = ContractPolicy::strict();
    }
    config.output.verbosity = config.output.verbosity.raised_by(cli.verbose);

    Ok((config, warnings))
}

fn cli_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}

fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

fn exit_code(error: &LoanError) -> i32 {
    match error {
        LoanError::Config { .. }
        | LoanError::UnknownFunction { .. }
        | LoanError::InvalidArguments { .. } => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Print the error in the requested format and exit
fn fail(format: &OutputFormat, error: &LoanError) -> ! {
    let line = create_renderer(*format).render_error(error);
    match format {
        OutputFormat::Json => println!("{}", line),
        OutputFormat::Text => eprintln!("{}", line),
    }
    std::process::exit(exit_code(error));
}
