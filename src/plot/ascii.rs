//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks of a sweep or simulation in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - data points: `o`
//! - connecting line: `-`

use crate::domain::{labels, Lang, SimulationRun, SweepRecord, VariableId};

/// Fixed y-range for effective R charts.
pub const R_RANGE: (f64, f64) = (0.0, 6.0);

/// Fixed y-range for daily growth (%) charts.
pub const GROWTH_RANGE: (f64, f64) = (-30.0, 50.0);

/// Render R and daily growth against the swept variable.
pub fn render_sweep_charts(
    records: &[SweepRecord],
    id: VariableId,
    lang: Lang,
    width: usize,
    height: usize,
) -> String {
    let x_label = id.variable().label.get(lang);
    let r: Vec<(f64, f64)> = records.iter().map(|rec| (rec.value(id), rec.r)).collect();
    let g: Vec<(f64, f64)> = records
        .iter()
        .map(|rec| (rec.value(id), rec.growth_percent))
        .collect();

    let mut out = render_series(
        &format!("{} / {x_label}", labels::R.get(lang)),
        &r,
        Some(R_RANGE),
        width,
        height,
    );
    out.push('\n');
    out.push_str(&render_series(
        &format!("{} / {x_label}", labels::GROWTH.get(lang)),
        &g,
        Some(GROWTH_RANGE),
        width,
        height,
    ));
    out
}

/// Render new cases per simulation step.
pub fn render_cases_chart(run: &SimulationRun, lang: Lang, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = run
        .new_cases()
        .into_iter()
        .enumerate()
        .map(|(step, cases)| (step as f64, cases))
        .collect();
    render_series(
        &format!("{} / {}", labels::NEW_CASES.get(lang), labels::DAY.get(lang)),
        &points,
        None,
        width,
        height,
    )
}

/// Render one series. `y_range` fixes the vertical axis; otherwise it is
/// derived from the data with 5% padding. Values outside a fixed range are
/// drawn on the nearest edge.
pub fn render_series(
    title: &str,
    points: &[(f64, f64)],
    y_range: Option<(f64, f64)>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = match y_range {
        Some(range) => range,
        None => {
            let (lo, hi) = data_y_range(points).unwrap_or((0.0, 1.0));
            pad_range(lo, hi, 0.05)
        }
    };

    let mut grid = vec![vec![' '; width]; height];

    // Line first so markers overlay it.
    let mut prev = None;
    for &(x, y) in points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(&mut grid, c0, r0, col, row, '-');
        }
        prev = Some((col, row));
    }
    for &(x, y) in points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format!(
        "x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn data_y_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && max_y.is_finite() {
        // flat series
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
