//! The presentation facade: collects the raw text inputs, runs the
//! parse -> integrate -> plot pipeline on demand and holds the outcome
//! of the latest submission.
//!
//! ## Example
//! ```
//! use integral_calc::app::calculator::IntegrationCalculator;
//!
//! let mut calc = IntegrationCalculator::new();
//! calc.set_inputs("x**2", "0", "2");
//! calc.set_plot_file(std::env::temp_dir().join("integral_doc_example.png"));
//! let outcome = calc.calculate().unwrap();
//! assert_eq!(format!("{:.6}", outcome.integral), "2.666667");
//! ```

use crate::app::errors::CalcError;
use crate::app::task_parser::IntegrationTask;
use crate::numerical::quadrature::{AdaptiveSettings, adaptive_quad};
use crate::plotting::plots::{PlotMeta, render_integral_plot};
use crate::symbolic::symbolic_lambdify::compile_function;
use chrono::Local;
use log::info;
use std::path::PathBuf;

/// Everything a successful submission produces. Immutable; replaced
/// wholesale by the next submission.
#[derive(Clone, Debug)]
pub struct IntegrationOutcome {
    pub function_text: String,
    pub lower: f64,
    pub upper: f64,
    pub integral: f64,
    pub error_estimate: f64,
    pub converged: bool,
    pub plot: PlotMeta,
}

impl IntegrationOutcome {
    /// The result block shown to the user: echoed function and limits,
    /// the integral to exactly 6 decimal places, the error estimate and
    /// the plot location.
    pub fn report(&self) -> String {
        let mut out = format!(
            "Function: {}\nIntegration limits: [{}, {}]\nResult = {:.6}\nError estimate: {:.2e}",
            self.function_text, self.lower, self.upper, self.integral, self.error_estimate
        );
        if !self.converged {
            out.push_str(" (tolerance not reached)");
        }
        out.push_str(&format!("\nPlot saved to {}", self.plot.path.display()));
        out
    }
}

/// Mutable calculator state: the three raw inputs plus settings. Each
/// `calculate()` call rebuilds everything from the current inputs; no
/// result survives into the next submission.
pub struct IntegrationCalculator {
    pub function_input: String,
    pub lower_input: String,
    pub upper_input: String,
    /// Target PNG path; a timestamped name in the working directory
    /// when unset.
    pub plot_file: Option<PathBuf>,
    pub settings: AdaptiveSettings,
    result: Option<IntegrationOutcome>,
}

impl Default for IntegrationCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationCalculator {
    pub fn new() -> IntegrationCalculator {
        IntegrationCalculator {
            function_input: String::new(),
            lower_input: String::new(),
            upper_input: String::new(),
            plot_file: None,
            settings: AdaptiveSettings::default(),
            result: None,
        }
    }

    pub fn set_inputs(&mut self, function: &str, lower: &str, upper: &str) {
        self.function_input = function.to_string();
        self.lower_input = lower.to_string();
        self.upper_input = upper.to_string();
    }

    pub fn set_plot_file(&mut self, path: impl Into<PathBuf>) {
        self.plot_file = Some(path.into());
    }

    /// Loads the inputs from a parsed task file.
    pub fn apply_task(&mut self, task: IntegrationTask) {
        self.function_input = task.function;
        self.lower_input = task.lower;
        self.upper_input = task.upper;
        if task.plot.is_some() {
            self.plot_file = task.plot;
        }
    }

    /// Outcome of the latest successful submission, if any.
    pub fn get_result(&self) -> Option<&IntegrationOutcome> {
        self.result.as_ref()
    }

    fn parse_bounds(&self) -> Result<(f64, f64), CalcError> {
        let parse = |label: &str, text: &str| -> Result<f64, CalcError> {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(CalcError::InvalidLimits(format!(
                    "the {} limit is missing",
                    label
                )));
            }
            trimmed.parse::<f64>().map_err(|_| {
                CalcError::InvalidLimits(format!("'{}' is not a number", trimmed))
            })
        };
        let lower = parse("lower", &self.lower_input)?;
        let upper = parse("upper", &self.upper_input)?;
        if !lower.is_finite() || !upper.is_finite() {
            return Err(CalcError::InvalidLimits(
                "limits must be finite numbers".to_string(),
            ));
        }
        if lower >= upper {
            return Err(CalcError::InvalidLimits(
                "the upper limit must be greater than the lower limit".to_string(),
            ));
        }
        Ok((lower, upper))
    }

    /// Runs the full pipeline on the current inputs.
    ///
    /// Validation order: the expression is compiled first, then the
    /// limits are checked, then quadrature and plotting run. The first
    /// failing stage categorizes the error; later stages never run.
    pub fn calculate(&mut self) -> Result<&IntegrationOutcome, CalcError> {
        self.result = None;

        let compiled =
            compile_function(&self.function_input).map_err(CalcError::InvalidFunction)?;
        let (lower, upper) = self.parse_bounds()?;

        info!(
            "integrating f(x) = {} over [{}, {}]",
            compiled.source(),
            lower,
            upper
        );

        let f = compiled.closure();
        let quad = adaptive_quad(&f, lower, upper, self.settings)
            .map_err(|e| CalcError::Calculation(e.to_string()))?;

        let plot_path = self
            .plot_file
            .clone()
            .unwrap_or_else(default_plot_path);
        let plot = render_integral_plot(&f, compiled.source(), lower, upper, &plot_path)
            .map_err(CalcError::Calculation)?;

        info!(
            "integral = {:.6}, error estimate = {:.2e}, {} function evaluations",
            quad.value, quad.error, quad.evaluations
        );

        Ok(&*self.result.insert(IntegrationOutcome {
            function_text: compiled.source().to_string(),
            lower,
            upper,
            integral: quad.value,
            error_estimate: quad.error,
            converged: quad.converged,
            plot,
        }))
    }
}

fn default_plot_path() -> PathBuf {
    PathBuf::from(format!(
        "integral_{}.png",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
