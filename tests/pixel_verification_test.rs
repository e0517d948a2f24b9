//! Pixel Verification Tests
//!
//! Each test checks a claim about where curve pixels land on the raster
//! chart. Strokes are drawn without anti-aliasing so colors compare exactly.
//!
//! Run: cargo test --test pixel_verification_test

#![allow(clippy::unwrap_used)]

use graph_plotter::prelude::*;

// Default surface is 800x600 with a 40px margin: the plot area spans
// x in 40..760 and y in 40..560, and y = 5 projects to row 170.
const CURVE_ROW: u32 = 170;

fn config() -> RenderConfig {
    RenderConfig { antialias: false, show_legend: false, ..RenderConfig::default() }
}

fn session() -> PlotSession<RasterAdapter> {
    PlotSession::new(RasterAdapter::new(config()))
}

fn chart(session: &PlotSession<RasterAdapter>) -> &Framebuffer {
    session.chart().expect("session should hold a chart")
}

fn column_has(fb: &Framebuffer, x: u32, rows: std::ops::Range<u32>, color: Rgba) -> bool {
    rows.into_iter().any(|y| fb.get_pixel(x, y) == Some(color))
}

fn count_columns(fb: &Framebuffer, columns: std::ops::Range<u32>, color: Rgba) -> usize {
    columns.filter(|&x| column_has(fb, x, CURVE_ROW - 4..CURVE_ROW + 5, color)).count()
}

// ============================================================================
// PIXEL VERIFICATION: PROJECTION
// ============================================================================

/// A constant curve is drawn on the row its value projects to, and nowhere
/// else in the column.
#[test]
fn pixel_constant_curve_lands_on_projected_row() {
    let mut session = session();
    session.plot(&PlotRequest::new("5", "red", DashPattern::Solid)).unwrap();
    let fb = chart(&session);

    for x in [100, 300, 500, 700] {
        assert!(
            column_has(fb, x, CURVE_ROW - 2..CURVE_ROW + 3, Rgba::RED),
            "PIXEL FAIL: no curve pixel near row {CURVE_ROW} in column {x}"
        );
        assert!(
            !column_has(fb, x, 40..CURVE_ROW - 4, Rgba::RED),
            "PIXEL FAIL: curve pixel above its row in column {x}"
        );
        assert!(
            !column_has(fb, x, CURVE_ROW + 5..560, Rgba::RED),
            "PIXEL FAIL: curve pixel below its row in column {x}"
        );
    }
}

/// Steep curves are clipped to the plot area and never paint the margins.
#[test]
fn pixel_curves_stay_inside_plot_area() {
    let mut session = session();
    session.plot(&PlotRequest::new("x^3", "red", DashPattern::Solid)).unwrap();
    session.plot(&PlotRequest::new("tan(x)", "red", DashPattern::Solid)).unwrap();
    let fb = chart(&session);

    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let outside = !(38..=762).contains(&x) || !(38..=562).contains(&y);
            if outside {
                assert_ne!(
                    fb.get_pixel(x, y),
                    Some(Rgba::RED),
                    "PIXEL FAIL: curve leaked into the margin at ({x}, {y})"
                );
            }
        }
    }
}

// ============================================================================
// PIXEL VERIFICATION: STYLE AND ORDER
// ============================================================================

/// A later curve paints over an earlier one on the same path.
#[test]
fn pixel_later_curve_paints_over_earlier() {
    let mut session = session();
    session.plot(&PlotRequest::new("5", "red", DashPattern::Solid)).unwrap();
    session.plot(&PlotRequest::new("5", "blue", DashPattern::Solid)).unwrap();
    let fb = chart(&session);

    assert_eq!(count_columns(fb, 60..740, Rgba::RED), 0, "PIXEL FAIL: earlier curve shows through");
    assert_eq!(count_columns(fb, 60..740, Rgba::BLUE), 680);
}

/// Dashed and dotted strokes leave gaps; solid strokes do not.
#[test]
fn pixel_patterns_leave_gaps() {
    let mut coverage = Vec::new();
    for pattern in [DashPattern::Solid, DashPattern::Dashed, DashPattern::Dotted] {
        let mut session = session();
        session.plot(&PlotRequest::new("5", "blue", pattern)).unwrap();
        coverage.push(count_columns(chart(&session), 60..740, Rgba::BLUE));
    }

    assert_eq!(coverage[0], 680, "PIXEL FAIL: solid stroke has gaps");
    assert!(coverage[1] < coverage[0], "PIXEL FAIL: dashed stroke has no gaps");
    assert!(coverage[2] > 0, "PIXEL FAIL: dotted stroke drew nothing");
    assert!(coverage[2] < coverage[0], "PIXEL FAIL: dotted stroke has no gaps");
}

/// Plotting darkens the chart; the SIMD luminance reduction sees it.
#[test]
fn pixel_plotting_lowers_mean_luminance() {
    let empty = ChartRenderer::new(config(), AxisConfig::STANDARD).to_framebuffer(&[]).unwrap();
    let (_, empty_max, empty_mean) = empty.luminance_stats();

    let mut session = session();
    session.plot(&PlotRequest::new("x", "black", DashPattern::Solid)).unwrap();
    let (plotted_min, _, plotted_mean) = chart(&session).luminance_stats();

    assert!((empty_max - 255.0).abs() < 0.5, "PIXEL FAIL: background is not white");
    assert!(plotted_min < 1.0, "PIXEL FAIL: black curve missing");
    assert!(plotted_mean < empty_mean, "PIXEL FAIL: plotting did not darken the chart");
}

// ============================================================================
// PIXEL VERIFICATION: LIFECYCLE
// ============================================================================

/// Clearing returns exports to the empty chart, byte for byte.
#[test]
fn pixel_cleared_export_matches_empty_chart() {
    let mut session = session();
    session.plot(&PlotRequest::new("sin(x)", "green", DashPattern::Dashed)).unwrap();
    let plotted = session.export_png().unwrap();
    session.clear();

    let empty = ChartRenderer::default().to_png(&[]).unwrap();
    assert_ne!(plotted, empty);
    assert_eq!(session.export_png().unwrap(), empty);
}

/// Redrawing the same registry gives the same pixels.
#[test]
fn pixel_rendering_is_deterministic() {
    let mut a = session();
    let mut b = session();
    for s in [&mut a, &mut b] {
        s.plot(&PlotRequest::new("x^2 / 5 - 3", "#ff8800", DashPattern::Solid)).unwrap();
        s.plot(&PlotRequest::new("cos(x) * 4", "purple", DashPattern::Dotted)).unwrap();
    }
    assert_eq!(chart(&a).pixels(), chart(&b).pixels());
}
