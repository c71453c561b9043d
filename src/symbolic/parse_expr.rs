//! a module turns a String expression into a symbolic expression
//!
//! The grammar is deliberately small: the variable `x`, numeric
//! literals, `+ - * / ^` (with `**` accepted as an alternative power
//! spelling), parentheses, the named constants `pi` and `e`, and a fixed
//! set of functions (`sin`, `cos`, `tan`, `exp`, `ln`/`log`, `sqrt`,
//! `abs`, `asin`, `acos`, `atan` and their `arc*`/`tg` aliases).
//! Anything outside this vocabulary is rejected with a message naming
//! the offending token.
//!
//! Parsing works by recursive splitting: the rightmost `+`/`-` outside
//! brackets, then the rightmost `*` or `/`, then the leftmost `^` (so
//! power chains associate right), then function prefixes, literals and
//! identifiers. Splitting at the rightmost operator of a precedence
//! level makes `a - b + c` and `a/b/c` associate left.
//!
//! Known limitation, kept from the splitting scheme: a bare `-`
//! directly after another operator (`x**-2`, `2*-3`) does not parse;
//! write `x**(-2)` instead.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    find_char_position_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_operator_outside_brackets, has_balanced_brackets,
};
use std::f64::consts::{E, PI};

/// Allow-listed function names mapped to their AST constructors.
/// Aliases (sympy spellings and mathematical notation) point at the
/// same variant.
static FUNCTIONS: &[(&str, fn(Box<Expr>) -> Expr)] = &[
    ("arcsin", Expr::arcsin),
    ("arccos", Expr::arccos),
    ("arctan", Expr::arctg),
    ("arctg", Expr::arctg),
    ("asin", Expr::arcsin),
    ("acos", Expr::arccos),
    ("atan", Expr::arctg),
    ("sqrt", Expr::Sqrt),
    ("abs", Expr::Abs),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tg),
    ("tg", Expr::tg),
    ("exp", Expr::Exp),
    ("ln", Expr::Ln),
    ("log", Expr::Ln),
];

impl Expr {
    /// Parses an expression string into a symbolic expression.
    ///
    /// # Example
    /// ```
    /// use integral_calc::symbolic::symbolic_engine::Expr;
    ///
    /// let expr = Expr::parse_expression("sin(x) + x**2").unwrap();
    /// assert_eq!(format!("{}", expr), "(sin(x) + (x ^ 2))");
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("expression is empty".to_string());
        }
        check_alphabet(trimmed)?;
        if !has_balanced_brackets(trimmed) {
            return Err("unbalanced brackets".to_string());
        }
        let normalized = trimmed.replace("**", "^");
        parse_node(&normalized)
    }
}

/// Rejects any character outside the token alphabet before parsing
/// starts, so `x = 1`, `f'(x)` or attribute access never reach the
/// splitting logic.
fn check_alphabet(input: &str) -> Result<(), String> {
    for c in input.chars() {
        let allowed = c.is_ascii_alphanumeric()
            || c.is_whitespace()
            || matches!(c, '_' | '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')');
        if !allowed {
            return Err(format!("disallowed token '{}'", c));
        }
    }
    Ok(())
}

fn parse_node(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("expected an operand, found nothing".to_string());
    }

    // Bare literals first, so scientific notation like 1e-3 is not torn
    // apart by the additive split below.
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }

    // Addition and subtraction, split at the rightmost occurrence
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();

        if left.is_empty() {
            // unary sign at the start of the operand
            return match op {
                '-' => match parse_node(right)? {
                    Expr::Const(v) => Ok(Expr::Const(-v)),
                    inner => Ok(-inner),
                },
                _ => parse_node(right),
            };
        }

        let lhs = parse_node(left)?;
        let rhs = parse_node(right)?;
        return Ok(match op {
            '+' => lhs + rhs,
            _ => lhs - rhs,
        });
    }

    // Multiplication and division, also rightmost for left associativity
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        let lhs = parse_node(left)?;
        let rhs = parse_node(right)?;
        return Ok(match op {
            '*' => lhs * rhs,
            _ => lhs / rhs,
        });
    }

    // Power, split at the leftmost occurrence for right associativity
    if let Some(pos) = find_char_position_outside_brackets(input, '^') {
        let base = input[..pos].trim();
        let exponent = input[pos + 1..].trim();
        let base_expr = parse_node(base)?;
        let exponent_expr = parse_node(exponent)?;
        return Ok(base_expr.pow(exponent_expr));
    }

    // Whole expression wrapped in brackets
    if input.starts_with('(') && input.ends_with(')') {
        if let Some(end) = find_pair_to_this_bracket(input) {
            if end == input.len() - 1 {
                return parse_node(&input[1..end]);
            }
        }
        return Err(format!("cannot parse '{}'", input));
    }

    // Allow-listed functions: name(arg)
    for (name, constructor) in FUNCTIONS {
        let prefix_len = name.len() + 1;
        if input.len() > prefix_len
            && input.starts_with(name)
            && input.as_bytes()[name.len()] == b'('
            && input.ends_with(')')
        {
            match find_pair_to_this_bracket(&input[name.len()..]) {
                Some(end) if name.len() + end == input.len() - 1 => {
                    let inner = &input[prefix_len..input.len() - 1];
                    return Ok(constructor(Box::new(parse_node(inner)?)));
                }
                _ => return Err(format!("cannot parse '{}'", input)),
            }
        }
    }

    // A call-looking token that survived the loop above uses a function
    // outside the allow-list
    if let Some(paren) = input.find('(') {
        let head = &input[..paren];
        if !head.is_empty() && head.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("unknown function '{}'", head));
        }
    }

    // Named constants and variables
    match input {
        "pi" | "PI" | "Pi" => return Ok(Expr::Const(PI)),
        "e" | "E" => return Ok(Expr::Const(E)),
        _ => {}
    }
    let is_identifier = input
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_identifier {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(format!("cannot parse '{}'", input))
}
