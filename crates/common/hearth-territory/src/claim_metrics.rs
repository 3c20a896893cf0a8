use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec,
};

lazy_static! {
    // Ledger operations
    pub static ref CLAIM_LEDGER_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "claim_ledger_operations_total",
        "Total number of operations against the free-claim ledger",
        &["ledger_type", "operation", "status"]
    )
    .unwrap();

    pub static ref CLAIM_LEDGER_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "claim_ledger_errors_total",
        "Total number of errors during free-claim ledger operations",
        &["ledger_type", "operation", "error_type"]
    )
    .unwrap();

    // Program state
    pub static ref FREE_CLAIMS_RECORDED_TOTAL: IntCounter = register_int_counter!(
        "free_claims_recorded_total",
        "Total number of free territory claims recorded by this process"
    )
    .unwrap();
}
