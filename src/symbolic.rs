//! Expression engine: turns a String expression into a symbolic
//! expression and a symbolic expression into an executable Rust
//! closure.
//!
//! # Example
//! ```
//! use integral_calc::symbolic::symbolic_engine::Expr;
//!
//! let parsed = Expr::parse_expression("x^2 + sin(x)").unwrap();
//! println!("parsed expression {}", parsed);
//! let f = parsed.lambdify1D();
//! println!("f(1) = {}", f(1.0));
//! ```

/// a module turns a String expression into a symbolic expression
pub mod parse_expr;
/// the core `Expr` AST with Display and operator overloads
pub mod symbolic_engine;
/// lambdification: symbolic expression -> executable closure, plus the
/// compiled-function wrapper with the single-variable contract
pub mod symbolic_lambdify;
/// bracket-aware string scanning helpers and linspace
pub mod utils;
