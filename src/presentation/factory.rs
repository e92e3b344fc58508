//! Contract Factory
//!
//! Wires the contract to its event sink and ledger backend according to
//! the resolved configuration. This is the dependency injection point
//! for the binary.

use std::path::Path;
use std::sync::Arc;

use crate::application::{ContractRouter, LoanContract};
use crate::config::{Config, LedgerBackend, OutputFormat, Verbosity};
use crate::domain::ports::{LoanEventSink, NoopEventSink};
use crate::error::LoanResult;
use crate::infrastructure::{ConsoleEventSink, FileLedger, JsonEventSink, MemoryLedger};

/// Event sink for the configured output mode
///
/// JSON mode streams events to stdout ahead of the result line, but only
/// when verbose. Text mode writes diagnostics to stderr.
pub fn create_event_sink(config: &Config) -> Arc<dyn LoanEventSink> {
    let verbosity = config.output.verbosity;
    match config.output.format {
        OutputFormat::Json if verbosity >= Verbosity::Verbose => Arc::new(JsonEventSink::stdout()),
        OutputFormat::Json => Arc::new(NoopEventSink),
        OutputFormat::Text if verbosity >= Verbosity::Verbose => {
            Arc::new(ConsoleEventSink::stderr(verbosity))
        }
        OutputFormat::Text => Arc::new(NoopEventSink),
    }
}

/// Router over a contract carrying the configured policy
pub fn create_router(config: &Config, events: Arc<dyn LoanEventSink>) -> ContractRouter {
    ContractRouter::new(LoanContract::new(config.policy, events))
}

/// Run one invocation against the configured ledger backend
///
/// Relative ledger paths resolve against `base`. The memory backend starts
/// from an empty world state on every call.
pub fn execute(
    router: &ContractRouter,
    config: &Config,
    base: &Path,
    function: &str,
    args: &[String],
) -> LoanResult<Vec<u8>> {
    match config.ledger.backend {
        LedgerBackend::File => {
            let ledger = FileLedger::new(config.ledger_path(base));
            router.execute(&ledger, function, args)
        }
        LedgerBackend::Memory => router.execute(&MemoryLedger::new(), function, args),
    }
}
