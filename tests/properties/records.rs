//! Property tests for the stored record format.

use proptest::prelude::*;

use loan_ledger::{ContractPolicy, LoanApplication, LoanRecord, LoanStatus};

fn loan_id() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_\\-]{1,24}").unwrap()
}

fn amount() -> impl Strategy<Value = f64> {
    prop_oneof![0.0..1.0e9f64, (0u32..1_000_000).prop_map(f64::from)]
}

fn record() -> impl Strategy<Value = LoanRecord> {
    (
        loan_id(),
        "\\PC{0,32}",
        amount(),
        1u32..480,
        0.0..1.0f64,
        proptest::collection::vec(-1.0e6..1.0e6f64, 0..6),
        any::<bool>(),
    )
        .prop_map(|(id, name, principal, term, rate, repayments, approved)| {
            let mut record =
                LoanRecord::open(LoanApplication::new(id, name, principal, term, rate))
                    .expect("generated application is valid");
            if approved {
                record
                    .approve(LoanStatus::Approved, &ContractPolicy::default())
                    .expect("fresh record approves");
            }
            for amount in repayments {
                if record.apply_repayment(amount, &ContractPolicy::default()).is_err() {
                    break;
                }
            }
            record
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: encoding then decoding any record yields an equal record.
    #[test]
    fn property_record_round_trip(record in record()) {
        let bytes = record.to_json().unwrap();
        let decoded = LoanRecord::from_json(record.loan_id(), &bytes).unwrap();
        prop_assert_eq!(decoded, record);
    }

    /// PROPERTY: the wire form always carries exactly the eight record fields.
    #[test]
    fn property_wire_form_has_fixed_fields(record in record()) {
        let value: serde_json::Value = serde_json::from_slice(&record.to_json().unwrap()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        prop_assert_eq!(
            keys,
            vec![
                "applicantName",
                "interestRate",
                "loanAmount",
                "loanID",
                "outstanding",
                "repayments",
                "status",
                "termMonths",
            ]
        );
    }

    /// PROPERTY: decoding arbitrary bytes never panics.
    #[test]
    fn property_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = LoanRecord::from_json("fuzz", &bytes);
    }
}
