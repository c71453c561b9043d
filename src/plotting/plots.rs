//! Samples a compiled function over a padded domain and renders the
//! integration plot: the curve, the shaded region between the bounds,
//! grid and axis decoration. Points where the function is undefined
//! become gaps in the curve instead of aborting the render.

use crate::symbolic::utils::linspace;
use nalgebra::DVector;
use plotters::prelude::*;
use plotters::style::full_palette::ORANGE;
use std::path::{Path, PathBuf};

/// Number of curve samples over the padded domain.
pub const CURVE_POINTS: usize = 1000;
/// Number of samples for the shaded region between the bounds.
pub const FILL_POINTS: usize = 500;
/// Fraction of the interval width added on each side for visual context.
pub const DOMAIN_PADDING: f64 = 0.2;

const PLOT_WIDTH: u32 = 800;
const PLOT_HEIGHT: u32 = 600;

/// Function samples over the padded plot domain. `y` entries are `None`
/// where the evaluation failed (non-finite result).
pub struct PlotSamples {
    pub x: DVector<f64>,
    pub y: Vec<Option<f64>>,
}

impl PlotSamples {
    /// Splits the samples into maximal runs of finite points; each run
    /// is drawn as its own line segment so gaps stay visible.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for (&x, y) in self.x.iter().zip(self.y.iter()) {
            match y {
                Some(y) => current.push((x, *y)),
                None => {
                    if current.len() > 1 {
                        segments.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() > 1 {
            segments.push(current);
        }
        segments
    }

    /// Count of points that evaluated to a finite value.
    pub fn finite_count(&self) -> usize {
        self.y.iter().filter(|y| y.is_some()).count()
    }

    /// Min/max over the finite samples, or None when every point failed.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for y in self.y.iter().flatten() {
            range = Some(match range {
                None => (*y, *y),
                Some((lo, hi)) => (lo.min(*y), hi.max(*y)),
            });
        }
        range
    }
}

/// Samples `f` at [`CURVE_POINTS`] evenly spaced points over
/// `[lower - p, upper + p]` where `p = DOMAIN_PADDING * (upper - lower)`.
pub fn sample_function(f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> PlotSamples {
    let pad = DOMAIN_PADDING * (upper - lower);
    let grid = linspace(lower - pad, upper + pad, CURVE_POINTS);
    let y = grid
        .iter()
        .map(|&x| {
            let y = f(x);
            y.is_finite().then_some(y)
        })
        .collect();
    PlotSamples {
        x: DVector::from_vec(grid),
        y,
    }
}

/// Description of a rendered plot; the PNG at `path` is the artifact.
#[derive(Clone, Debug)]
pub struct PlotMeta {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub curve_points: usize,
    pub fill_points: usize,
}

/// Renders the integration plot to a PNG file.
///
/// The curve is drawn over the padded domain; the region bounded by the
/// curve, the x-axis and the vertical lines at `lower`/`upper` is
/// shaded. Fails when every sample is non-finite.
pub fn render_integral_plot(
    f: &dyn Fn(f64) -> f64,
    expr_text: &str,
    lower: f64,
    upper: f64,
    path: &Path,
) -> Result<PlotMeta, String> {
    let samples = sample_function(f, lower, upper);
    let (y_min, y_max) = samples
        .y_range()
        .ok_or_else(|| "the function has no finite values on the plot domain".to_string())?;

    // include the x-axis so the shaded area is anchored, then pad
    let y_min = y_min.min(0.0);
    let y_max = y_max.max(0.0);
    let mut y_span = y_max - y_min;
    if y_span == 0.0 {
        y_span = y_max.abs().max(1.0);
    }
    let y_lo = y_min - 0.05 * y_span;
    let y_hi = y_max + 0.05 * y_span;

    let x_min = samples.x[0];
    let x_max = samples.x[samples.x.len() - 1];

    let fill: Vec<(f64, f64)> = linspace(lower, upper, FILL_POINTS)
        .into_iter()
        .filter_map(|x| {
            let y = f(x);
            y.is_finite().then_some((x, y))
        })
        .collect();

    let root_area =
        BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area
        .fill(&WHITE)
        .map_err(|e| format!("failed to prepare drawing area: {}", e))?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(format!("Integration of {}", expr_text), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, y_lo..y_hi)
        .map_err(|e| format!("failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("f(x)")
        .draw()
        .map_err(|e| format!("failed to draw grid: {}", e))?;

    chart
        .draw_series(AreaSeries::new(fill.iter().copied(), 0.0, ORANGE.mix(0.3)))
        .map_err(|e| format!("failed to shade integration area: {}", e))?
        .label(format!("area on [{}, {}]", lower, upper))
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 16, y + 4)], ORANGE.mix(0.3).filled()));

    let segments = samples.segments();
    for (i, segment) in segments.iter().enumerate() {
        let series = chart
            .draw_series(LineSeries::new(segment.iter().copied(), &BLUE))
            .map_err(|e| format!("failed to draw curve: {}", e))?;
        if i == 0 {
            series
                .label(format!("f(x) = {}", expr_text))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| format!("failed to draw legend: {}", e))?;

    root_area
        .present()
        .map_err(|e| format!("failed to write plot to {}: {}", path.display(), e))?;

    Ok(PlotMeta {
        path: path.to_path_buf(),
        width: PLOT_WIDTH,
        height: PLOT_HEIGHT,
        curve_points: samples.finite_count(),
        fill_points: fill.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_lambdify::compile_function;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_sampling_spans_padded_domain() {
        let lower = 0.0;
        let upper = 2.0 * PI;
        let samples = sample_function(&|x: f64| x.sin(), lower, upper);
        let pad = DOMAIN_PADDING * (upper - lower);
        assert_eq!(samples.x.len(), CURVE_POINTS);
        assert_relative_eq!(samples.x[0], lower - pad, epsilon = 1e-12);
        assert_relative_eq!(
            samples.x[samples.x.len() - 1],
            upper + pad,
            epsilon = 1e-12
        );
        assert_eq!(samples.finite_count(), CURVE_POINTS);
    }

    #[test]
    fn test_undefined_points_become_gaps() {
        // ln(x) is undefined left of 0; the padded domain dips below it
        let samples = sample_function(&|x: f64| x.ln(), 0.1, 2.0);
        assert!(samples.finite_count() < CURVE_POINTS);
        assert!(samples.finite_count() > 0);
        let segments = samples.segments();
        assert!(!segments.is_empty());
        for segment in &segments {
            assert!(segment.iter().all(|(_, y)| y.is_finite()));
        }
    }

    #[test]
    fn test_segments_split_around_pole() {
        let samples = sample_function(&|x: f64| (1.0 / x).min(1e6).max(-1e6), -1.0, 1.0);
        // tan-style overflow never hits exactly, but 1/x at the grid
        // midpoint may; either way all segments must be finite
        for segment in samples.segments() {
            assert!(segment.len() > 1);
            assert!(segment.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
        }
    }

    #[test]
    fn test_y_range_ignores_failed_points() {
        // the padded domain reaches below zero where sqrt is undefined
        let samples = sample_function(&|x: f64| x.sqrt(), 0.5, 4.0);
        assert!(samples.finite_count() < CURVE_POINTS);
        let (lo, hi) = samples.y_range().unwrap();
        assert!(lo >= 0.0);
        assert!(hi <= 4.7_f64.sqrt() + 1e-9);
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sin.png");
        let compiled = compile_function("sin(x)").unwrap();
        let f = compiled.closure();
        let meta = render_integral_plot(&f, "sin(x)", 0.0, 2.0 * PI, &path).unwrap();
        assert_eq!(meta.width, 800);
        assert_eq!(meta.height, 600);
        assert_eq!(meta.fill_points, FILL_POINTS);
        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn test_render_tolerates_partial_domain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ln.png");
        let compiled = compile_function("ln(x)").unwrap();
        let f = compiled.closure();
        let meta = render_integral_plot(&f, "ln(x)", 0.1, 2.0, &path).unwrap();
        assert!(meta.curve_points < CURVE_POINTS);
        assert!(path.exists());
    }

    #[test]
    fn test_render_fails_when_nothing_is_finite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let err =
            render_integral_plot(&|_| f64::NAN, "sqrt(-1-x^2)", 0.0, 1.0, &path).unwrap_err();
        assert!(err.contains("no finite values"), "got: {}", err);
    }

    #[test]
    fn test_fill_extent_matches_bounds_exactly() {
        let grid = linspace(1.0, 3.0, FILL_POINTS);
        assert_eq!(grid[0], 1.0);
        assert_eq!(grid[FILL_POINTS - 1], 3.0);
    }
}
