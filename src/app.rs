//! Presentation layer: input validation, the calculation pipeline and
//! the report shown to the user.

/// the calculator facade driving parse -> integrate -> plot
pub mod calculator;
/// the three user-facing error classes
pub mod errors;
/// parse a TOML task document into calculator inputs
pub mod task_parser;
