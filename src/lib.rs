#![doc(test(attr(deny(warnings))))]

//! Split Core offers the expense collection, settlement, and persistence
//! primitives that power shared-expense tracking front ends.

pub mod config;
pub mod engine;
pub mod errors;
pub mod expense;
pub mod money;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Split Core tracing initialized.");
    });
}
