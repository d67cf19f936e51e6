//! Static plots of simulation results
//!
//! Every plot is a single curve with an optional dashed reference line:
//!
//! | Function | Curve | Reference |
//! |----------|-------|-----------|
//! | [`plot_rotation_curve`] | `v(r)` | vertical line at the pivot radius |
//! | [`plot_acceleration_profile`] | `a(r)` | horizontal line at `a0` |
//! | [`plot_scale_factor`] | `a(t)` | none |
//! | [`plot_series`] | any `y(x)` | none |
//!
//! The output format follows the file extension: `.svg` uses the SVG backend,
//! anything else the bitmap backend (PNG).
//!
//! # Example
//!
//! ```rust,ignore
//! use arp_rs::output::visualization::{plot_rotation_curve, PlotConfig};
//!
//! plot_rotation_curve(&curve, "out/rotation_curve.png", None)?;
//!
//! let config = PlotConfig::rotation_curve("Milky Way");
//! plot_rotation_curve(&curve, "out/rotation_curve.svg", Some(&config))?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::PlotConfig;
use crate::models::{CosmicEvolution, RotationCurve};
use crate::physics::PhysicalConstants;

/// Dashed line drawn on top of the curve
#[derive(Debug, Clone, Copy)]
enum ReferenceLine<'a> {
    Vertical { x: f64, label: &'a str },
    Horizontal { y: f64, label: &'a str },
}

const DASH_COUNT: usize = 40;

// =================================================================================================
// Helpers
// =================================================================================================

fn check_series(x: &[f64], y: &[f64]) -> Result<(), Box<dyn Error>> {
    if x.is_empty() {
        return Err("Cannot plot an empty series".into());
    }
    if x.len() != y.len() {
        return Err(format!(
            "x and y series must have the same length ({} vs {})",
            x.len(),
            y.len()
        )
        .into());
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err("Cannot plot non-finite values".into());
    }
    Ok(())
}

/// Data range with 10% margin; degenerate ranges are widened
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let span = max - min;
    if span > 0.0 {
        (min - 0.1 * span, max + 0.1 * span)
    } else {
        let pad = if min.abs() > 0.0 { 0.1 * min.abs() } else { 1.0 };
        (min - pad, max + pad)
    }
}

fn draw_curve_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    reference: Option<ReferenceLine<'_>>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let x_min = x.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (x_lo, x_hi) = if x_max > x_min {
        (x_min, x_max)
    } else {
        padded_range([x_min, x_max].into_iter())
    };

    let reference_y = match reference {
        Some(ReferenceLine::Horizontal { y, .. }) => Some(y),
        _ => None,
    };
    let (y_lo, y_hi) = padded_range(y.iter().cloned().chain(reference_y));

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    chart.draw_series(LineSeries::new(
        x.iter().zip(y.iter()).map(|(a, b)| (*a, *b)),
        config.line_color.stroke_width(config.line_width),
    ))?;

    if let Some(line) = reference {
        let (start, end, label) = match line {
            ReferenceLine::Vertical { x, label } => ((x, y_lo), (x, y_hi), label),
            ReferenceLine::Horizontal { y, label } => ((x_lo, y), (x_hi, y), label),
        };

        let color = config.reference_color;
        let width = config.line_width;
        let style = color.stroke_width(width);
        let point = |k: usize| {
            let s = k as f64 / DASH_COUNT as f64;
            (start.0 + s * (end.0 - start.0), start.1 + s * (end.1 - start.1))
        };

        chart
            .draw_series(
                (0..DASH_COUNT)
                    .step_by(2)
                    .map(|k| PathElement::new(vec![point(k), point(k + 1)], style)),
            )?
            .label(label)
            .legend(move |(px, py)| {
                PathElement::new(vec![(px, py), (px + 20, py)], color.stroke_width(width))
            });

        chart
            .configure_series_labels()
            .background_style(config.background.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn render(
    x: &[f64],
    y: &[f64],
    reference: Option<ReferenceLine<'_>>,
    output_path: &Path,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    check_series(x, y)?;

    let is_svg = output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_curve_on_area(&root, x, y, reference, config)
    } else {
        let root =
            BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_curve_on_area(&root, x, y, reference, config)
    }
}

// =================================================================================================
// Public plotting functions
// =================================================================================================

/// Plot an arbitrary `y(x)` series
///
/// # Errors
///
/// Empty series, mismatched lengths, non-finite values, or a backend failure.
pub fn plot_series(
    x: &[f64],
    y: &[f64],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let config = config.cloned().unwrap_or_default();
    render(x, y, None, output_path.as_ref(), &config)
}

/// Plot circular velocity against radius with a dashed line at the pivot radius
pub fn plot_rotation_curve(
    curve: &RotationCurve,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let config = config
        .cloned()
        .unwrap_or_else(|| PlotConfig::rotation_curve(None::<&str>));
    let label = format!("R0 = {} kpc", curve.pivot_radius);

    render(
        curve.radius.as_slice(),
        curve.velocity.as_slice(),
        Some(ReferenceLine::Vertical {
            x: curve.pivot_radius,
            label: &label,
        }),
        output_path.as_ref(),
        &config,
    )
}

/// Plot centripetal acceleration against radius with the reference
/// acceleration `a0` as a dashed horizontal line
pub fn plot_acceleration_profile(
    curve: &RotationCurve,
    constants: &PhysicalConstants,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let config = config
        .cloned()
        .unwrap_or_else(|| PlotConfig::acceleration_profile(None::<&str>));
    let a0 = constants.reference_acceleration;
    let label = format!("a0 = {:e} m/s²", a0);

    render(
        curve.radius.as_slice(),
        curve.acceleration.as_slice(),
        Some(ReferenceLine::Horizontal { y: a0, label: &label }),
        output_path.as_ref(),
        &config,
    )
}

/// Plot the scale factor against time
pub fn plot_scale_factor(
    evolution: &CosmicEvolution,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let config = config
        .cloned()
        .unwrap_or_else(|| PlotConfig::scale_factor(None::<&str>));

    render(
        &evolution.time,
        &evolution.scale_factor,
        None,
        output_path.as_ref(),
        &config,
    )
}

// =================================================================================================
// Tests
// =================================================================================================
