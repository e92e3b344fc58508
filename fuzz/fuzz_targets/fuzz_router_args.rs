#![no_main]

use libfuzzer_sys::fuzz_target;
use loan_ledger::{ContractRouter, LoanContract, MemoryLedger};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Each line is one invocation: function name followed by tab-separated args
    let ledger = MemoryLedger::new();
    let router = ContractRouter::new(LoanContract::default());
    for line in content.lines().take(16) {
        let mut parts = line.split('\t');
        let function = parts.next().unwrap_or_default();
        let args: Vec<String> = parts.map(str::to_string).collect();
        let _ = router.execute(&ledger, function, &args);
    }
});
