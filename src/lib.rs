#![doc(test(attr(deny(warnings))))]

//! Gîtes dashboard: booking-feed loading, period reports and the command
//! shell that prints them.
//!
//! The aggregation itself lives in `gites_core`; this crate wires it to the
//! configuration, the session gate and the terminal.

pub mod cli;
pub mod errors;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Gites dashboard tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
