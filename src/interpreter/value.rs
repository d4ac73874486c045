/// Core value representation.
///
/// Defines the `Value` enum produced by evaluation and stored in the
/// environment, together with conversions from Rust types, truthiness and
/// record access.
pub mod core;
/// Text rendering of values.
///
/// Implements `Display` for `Value`, which is what a title placeholder is
/// replaced with.
pub mod display;

pub use self::core::Value;
