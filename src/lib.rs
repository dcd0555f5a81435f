#![doc(test(attr(deny(warnings))))]

//! Budget Alerts runs the per-session budget threshold engine against a
//! data directory and reports alerts to the terminal.

pub mod app;
pub mod console;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Alerts tracing initialized.");
    });
}
