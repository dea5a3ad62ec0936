//! gites-domain
//!
//! Pure data types for the rental dashboard (bookings, datasets, periods,
//! derived statistics and the business rules that shape them).
//! No I/O, no CLI, no parsing.

pub mod booking;
pub mod period;
pub mod rules;
pub mod stats;

pub use booking::*;
pub use period::*;
pub use rules::*;
pub use stats::*;
