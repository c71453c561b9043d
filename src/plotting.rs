//! Plot rendering for the calculator.

/// tiny module to sample a function over the padded domain and draw the
/// integration plot with plotters
pub mod plots;
