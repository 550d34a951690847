//! Unit test modules.

mod common;
mod filter_test;
mod plan_aggregate_test;
mod risk_flags_test;
