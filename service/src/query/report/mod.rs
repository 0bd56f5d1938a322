//! Reports [`Query`]s.
//!
//! [`Query`]: crate::Query

pub mod revenue;

pub use self::revenue::Revenue;
