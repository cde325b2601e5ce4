//! Types library for the open-interest dashboard
//!
//! Shared, I/O-free definitions used by the market-data ingestor and the
//! gateway facade.
//!
//! # Modules
//! - `ids`: Market keys and the tracked LLP account index
//! - `numeric`: Lenient JSON number coercion
//! - `account`: Upstream account-query accessors
//! - `position`: Position summary and the numeric aggregator

// Public modules
pub mod ids;
pub mod numeric;
pub mod account;
pub mod position;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::account::*;
    pub use crate::position::*;
}
