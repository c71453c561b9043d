//! Numerical integration routines.

/// adaptive Gauss-Kronrod quadrature with per-interval error control,
/// plus a fixed-order Gauss-Legendre cross-check
pub mod quadrature;
