//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks when the TUI isn't wanted
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - the series as a `-` line
//! - first and last points of the range: `o`

use crate::domain::Observation;
use crate::report::format::{format_number_de, format_timestamp_de};

/// Render a line plot of `points` (already sorted by time).
pub fn render_ascii_plot(points: &[Observation], width: usize, height: usize) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return "Plot: no data\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = time_range(first.time(), last.time());
    let (y_min, y_max) = value_range(points);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    let mut prev = None;
    for p in points {
        let x = map_x(p.time() as f64, t_min, t_max, width);
        let y = map_y(p.value(), y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(&mut grid, x0, y0, x, y, '-'),
            None => grid[y][x] = '-',
        }
        prev = Some((x, y));
    }

    // Endpoints overlay the line.
    for p in [first, last] {
        let x = map_x(p.time() as f64, t_min, t_max, width);
        let y = map_y(p.value(), y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} .. {} | y=[{}, {}]\n",
        format_timestamp_de(first.time()),
        format_timestamp_de(last.time()),
        format_number_de(y_min),
        format_number_de(y_max),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn time_range(first: i64, last: i64) -> (f64, f64) {
    if last > first {
        (first as f64, last as f64)
    } else {
        // Single instant: centre it with an hour either side.
        (first as f64 - 3600.0, first as f64 + 3600.0)
    }
}

fn value_range(points: &[Observation]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_y = min_y.min(p.value());
        max_y = max_y.max(p.value());
    }

    if max_y > min_y {
        (min_y, max_y)
    } else {
        (min_y - 1.0, max_y + 1.0)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
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
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(time: i64, value: f64) -> Observation {
        Observation::new(time, value).unwrap()
    }

    #[test]
    fn empty_range_has_placeholder() {
        assert_eq!(render_ascii_plot(&[], 40, 10), "Plot: no data\n");
    }

    #[test]
    fn flat_series_golden_snapshot() {
        let points = [obs(0, 100.0), obs(1800, 100.0), obs(3600, 100.0)];
        let txt = render_ascii_plot(&points, 10, 5);
        let expected = concat!(
            "Plot: 01.01.1970 00:00 .. 01.01.1970 01:00 | y=[98,90, 101,10]\n",
            "          \n",
            "          \n",
            "o--------o\n",
            "          \n",
            "          \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn rising_series_marks_both_ends() {
        let points = [obs(0, 100.0), obs(86_400, 110.0)];
        let txt = render_ascii_plot(&points, 10, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.chars().count() == 10));
        assert!(rows[4].starts_with('o'));
        assert!(rows[0].ends_with('o'));
    }

    #[test]
    fn single_point_is_centred() {
        let txt = render_ascii_plot(&[obs(0, 5.0)], 11, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows[2], "     o     ");
    }
}
