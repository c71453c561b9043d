//! LAMBDIFICATION - converting symbolic expressions to executable closures
//!
//! Evaluation is plain `f64` arithmetic: a point where the expression is
//! mathematically undefined (division by zero, `ln` of a non-positive
//! number, `sqrt` of a negative number) comes back as NaN or an
//! infinity. Callers treat non-finite results as per-point evaluation
//! failures; nothing here panics on user input.

use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

/// Unary real-to-real closure produced from an expression.
pub type Func1D = Box<dyn Fn(f64) -> f64 + Send + Sync>;

impl Expr {
    /// Converts the expression into an executable closure of one
    /// variable. The closure structure mirrors the expression tree, so
    /// there is no parsing or interpretation at call time.
    ///
    /// Every `Var` in the tree is bound to the closure argument; use
    /// [`compile_function`] when the single-variable contract has to be
    /// checked first.
    ///
    /// # Example
    /// ```
    /// use integral_calc::symbolic::symbolic_engine::Expr;
    ///
    /// let expr = Expr::parse_expression("x^2 + 2*x + 1").unwrap();
    /// let f = expr.lambdify1D();
    /// assert_eq!(f(3.0), 16.0);
    /// ```
    pub fn lambdify1D(&self) -> Func1D {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) + rf(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) - rf(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) * rf(x))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) / rf(x))
            }
            Expr::Pow(base, exp) => {
                let bf = base.lambdify1D();
                let ef = exp.lambdify1D();
                Box::new(move |x| bf(x).powf(ef(x)))
            }
            Expr::Exp(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).exp())
            }
            Expr::Ln(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).ln())
            }
            Expr::Sqrt(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).sqrt())
            }
            Expr::Abs(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).abs())
            }
            Expr::sin(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).sin())
            }
            Expr::cos(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).cos())
            }
            Expr::tg(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).tan())
            }
            Expr::arcsin(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).asin())
            }
            Expr::arccos(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).acos())
            }
            Expr::arctg(expr) => {
                let f = expr.lambdify1D();
                Box::new(move |x| f(x).atan())
            }
        }
    }

    /// Evaluates the expression at a single point.
    pub fn eval_at(&self, x: f64) -> f64 {
        self.lambdify1D()(x)
    }
}

/// A compiled single-variable function: the original source text, the
/// parsed tree and the executable closure. Created once per submission
/// and discarded with it.
pub struct CompiledFunction {
    source: String,
    expr: Expr,
    func: Func1D,
}

/// Manual impl: the closure has no useful representation.
impl fmt::Debug for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFunction")
            .field("source", &self.source)
            .field("expr", &self.expr)
            .finish_non_exhaustive()
    }
}

impl CompiledFunction {
    /// The expression text as the user typed it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed symbolic form.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates at a point; non-finite output means the function is
    /// undefined there.
    pub fn eval(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    /// Borrow the underlying closure, for callers that integrate or
    /// sample through a plain `Fn(f64) -> f64`.
    pub fn closure(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| (self.func)(x)
    }
}

/// Compiles expression text into a [`CompiledFunction`].
///
/// Rejects empty input, anything the parser rejects, and any identifier
/// other than the variable `x` - the calculator's functions are unary
/// in `x` by contract. Constant expressions (no variable at all) are
/// accepted.
pub fn compile_function(text: &str) -> Result<CompiledFunction, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("expression is empty".to_string());
    }
    let expr = Expr::parse_expression(trimmed)?;
    let vars = expr.extract_variables();
    let foreign: Vec<&String> = vars.iter().filter(|v| v.as_str() != "x").collect();
    if !foreign.is_empty() {
        let names: Vec<&str> = foreign.iter().map(|s| s.as_str()).collect();
        return Err(format!(
            "unknown identifier '{}': the function must depend on x only",
            names.join("', '")
        ));
    }
    let func = expr.lambdify1D();
    Ok(CompiledFunction {
        source: trimmed.to_string(),
        expr,
        func,
    })
}
