#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Stored bytes are untrusted; decoding must fail cleanly, never panic
    if let Ok(record) = loan_ledger::LoanRecord::from_json("fuzz", data) {
        let encoded = record.to_json().expect("decoded record re-encodes");
        let again = loan_ledger::LoanRecord::from_json("fuzz", &encoded)
            .expect("encoded record decodes");
        assert_eq!(record.loan_id(), again.loan_id());
        assert_eq!(record.status(), again.status());
    }
});
