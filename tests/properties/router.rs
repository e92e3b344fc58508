//! Property tests for the function dispatcher.

use proptest::prelude::*;

use loan_ledger::{ContractFunction, ContractRouter, LoanContract, LoanError, MemoryLedger};

fn function_name() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(ContractFunction::ALL.to_vec()).prop_map(|f| f.name().to_string()),
        "\\PC{0,16}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the dispatcher never panics on arbitrary names and arguments.
    #[test]
    fn property_router_never_panics(
        calls in proptest::collection::vec(
            (function_name(), proptest::collection::vec("\\PC{0,12}", 0..7)),
            1..8,
        )
    ) {
        let ledger = MemoryLedger::new();
        let router = ContractRouter::new(LoanContract::default());
        for (function, args) in calls {
            let _ = router.execute(&ledger, &function, &args);
        }
    }

    /// PROPERTY: a call with the wrong arity is always InvalidArguments and writes nothing.
    #[test]
    fn property_wrong_arity_is_rejected(
        function in proptest::sample::select(ContractFunction::ALL.to_vec()),
        extra in 1usize..4,
    ) {
        let ledger = MemoryLedger::new();
        let router = ContractRouter::new(LoanContract::default());
        let args = vec!["x".to_string(); function.params().len() + extra];

        let result = router.execute(&ledger, function.name(), &args);

        let is_invalid_arguments = matches!(result, Err(LoanError::InvalidArguments { .. }));
        prop_assert!(is_invalid_arguments);
        prop_assert!(ledger.snapshot().is_empty());
    }
}
