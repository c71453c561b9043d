//! # Symbolic Engine Module
//!
//! Core expression type for the calculator: a recursive AST covering the
//! allow-listed vocabulary (arithmetic, powers, a fixed set of named
//! functions and the constants `pi` and `e`). Expressions are created by
//! the parser ([`crate::symbolic::parse_expr`]) and turned into executable
//! closures by the lambdify module
//! ([`crate::symbolic::symbolic_lambdify`]).
//!
//! ## Example
//! ```
//! use integral_calc::symbolic::symbolic_engine::Expr;
//!
//! let expr = Expr::parse_expression("x^2 + 1").unwrap();
//! let f = expr.lambdify1D();
//! assert_eq!(f(3.0), 10.0);
//! ```

#![allow(non_camel_case_types)]

use std::fmt;

/// Symbolic expression tree. Function variants follow mathematical
/// notation (`tg`, `arctg`) rather than programming conventions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g. "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Square root: sqrt(x)
    Sqrt(Box<Expr>),
    /// Absolute value: |x|
    Abs(Box<Expr>),
    /// Sine
    sin(Box<Expr>),
    /// Cosine
    cos(Box<Expr>),
    /// Tangent - mathematical notation 'tg'
    tg(Box<Expr>),
    /// Arcsine
    arcsin(Box<Expr>),
    /// Arccosine
    arccos(Box<Expr>),
    /// Arctangent - mathematical notation 'arctg'
    arctg(Box<Expr>),
}

/// Pretty printing in mathematical notation, parenthesised for
/// unambiguous precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::Sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::Abs(expr) => write!(f, "abs({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Convenience wrapper for the recursive Box<Expr> structure.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Collects the distinct variable names appearing in the expression,
    /// sorted alphabetically.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Sqrt(expr)
            | Expr::Abs(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr) => expr.collect_variables(vars),
        }
    }

    /// True when the expression references the given variable.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        self.extract_variables().iter().any(|v| v == var_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_arithmetic() {
        let x = Expr::Var("x".to_string());
        let expr = x + Expr::Const(2.0);
        assert_eq!(format!("{}", expr), "(x + 2)");
    }

    #[test]
    fn test_display_function() {
        let expr = Expr::sin(Expr::Var("x".to_string()).boxed());
        assert_eq!(format!("{}", expr), "sin(x)");
    }

    #[test]
    fn test_neg_builds_mul_by_minus_one() {
        let x = Expr::Var("x".to_string());
        let expr = -x.clone();
        assert_eq!(expr, Expr::Mul(Expr::Const(-1.0).boxed(), x.boxed()));
    }

    #[test]
    fn test_extract_variables_dedup_and_sort() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * x.clone() + Expr::Const(1.0);
        assert_eq!(expr.extract_variables(), vec!["x".to_string()]);
    }

    #[test]
    fn test_extract_variables_constant_expression() {
        let expr = Expr::Const(3.0) + Expr::Const(4.0);
        assert!(expr.extract_variables().is_empty());
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::Ln(Expr::Var("x".to_string()).boxed());
        assert!(expr.contains_variable("x"));
        assert!(!expr.contains_variable("y"));
    }
}
