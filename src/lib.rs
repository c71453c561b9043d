//! integral_calc: evaluate a definite integral of a user-supplied
//! expression of one variable and plot the function with the
//! integration region shaded.
//!
//! The pipeline is parse ([`symbolic`]) -> adaptive quadrature
//! ([`numerical`]) and plot ([`plotting`]) -> report ([`app`]); each
//! submission is independent and owns its own compiled function,
//! bounds, result and plot.
//!
//! # Example
//! ```
//! use integral_calc::app::calculator::IntegrationCalculator;
//!
//! let mut calc = IntegrationCalculator::new();
//! calc.set_inputs("sin(x)", "0", "3.141592653589793");
//! calc.set_plot_file(std::env::temp_dir().join("integral_lib_example.png"));
//! let outcome = calc.calculate().unwrap();
//! assert_eq!(format!("{:.6}", outcome.integral), "2.000000");
//! ```

pub mod app;
pub mod numerical;
pub mod plotting;
pub mod symbolic;
