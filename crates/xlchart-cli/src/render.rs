//! SVG rendering of extracted charts.
//!
//! The renderer draws from the extracted configuration plus the number
//! caches embedded in the chart part, so it works on any workbook without a
//! spreadsheet engine. It aims for a recognizable picture of each chart,
//! not a faithful reproduction of the host application's layout.

use std::fmt::Write;

use xlchart_model::{ChartRecord, ChartType};
use xlchart_xlsx::CachedSeries;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 40.0;

const PALETTE: [&str; 8] = [
    "#4472c4", "#ed7d31", "#a5a5a5", "#ffc000", "#5b9bd5", "#70ad47", "#264478", "#9e480e",
];

/// Renders one chart to an SVG document.
pub fn render_svg(record: &ChartRecord, series: &[&CachedSeries]) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = write!(
        svg,
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
    );

    if !record.title.is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
            WIDTH / 2.0,
            escape_text(&record.title)
        );
    }

    let kind = record.chart_type;
    if kind == ChartType::PIE || kind == ChartType::DOUGHNUT {
        draw_pie(&mut svg, series, kind == ChartType::DOUGHNUT);
    } else if kind.is_scatter() {
        draw_frame(&mut svg);
        draw_scatter(&mut svg, series, kind == ChartType::XY_SCATTER_LINES);
    } else if kind.is_bar() {
        draw_frame(&mut svg);
        draw_bars(&mut svg, series, true);
    } else if kind.is_column() {
        draw_frame(&mut svg);
        draw_bars(&mut svg, series, false);
    } else {
        draw_frame(&mut svg);
        draw_lines(&mut svg, series);
    }

    svg.push_str("</svg>\n");
    svg
}

fn draw_frame(svg: &mut String) {
    let _ = write!(
        svg,
        r##"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{}" height="{}" fill="none" stroke="#bfbfbf"/>"##,
        plot_width(),
        plot_height()
    );
}

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Value range covering every series, widened to include zero so bars have a
/// baseline. Degenerate ranges fall back to a unit span.
fn value_range(series: &[&CachedSeries]) -> (f64, f64) {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for s in series {
        for &y in &s.ys {
            min = min.min(y);
            max = max.max(y);
        }
    }
    if min == max {
        max = min + 1.0;
    }
    (min, max)
}

fn scale_y(value: f64, min: f64, max: f64) -> f64 {
    MARGIN_TOP + plot_height() * (1.0 - (value - min) / (max - min))
}

fn draw_bars(svg: &mut String, series: &[&CachedSeries], horizontal: bool) {
    let (min, max) = value_range(series);
    let points = series.iter().map(|s| s.ys.len()).max().unwrap_or(0);
    if points == 0 || series.is_empty() {
        return;
    }
    let lanes = points as f64;
    let lane_extent = if horizontal { plot_height() } else { plot_width() };
    let lane = lane_extent / lanes;
    let bar = lane * 0.7 / series.len() as f64;

    for (si, s) in series.iter().enumerate() {
        let color = PALETTE[si % PALETTE.len()];
        for (pi, &y) in s.ys.iter().enumerate() {
            let offset = lane * pi as f64 + lane * 0.15 + bar * si as f64;
            if horizontal {
                let x0 = MARGIN_LEFT + plot_width() * (0.0 - min) / (max - min);
                let x1 = MARGIN_LEFT + plot_width() * (y - min) / (max - min);
                let _ = write!(
                    svg,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{color}"/>"#,
                    x0.min(x1),
                    MARGIN_TOP + offset,
                    (x1 - x0).abs(),
                    bar
                );
            } else {
                let y0 = scale_y(0.0, min, max);
                let y1 = scale_y(y, min, max);
                let _ = write!(
                    svg,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{color}"/>"#,
                    MARGIN_LEFT + offset,
                    y0.min(y1),
                    bar,
                    (y1 - y0).abs()
                );
            }
        }
    }
}

fn draw_lines(svg: &mut String, series: &[&CachedSeries]) {
    let (min, max) = value_range(series);
    for (si, s) in series.iter().enumerate() {
        if s.ys.is_empty() {
            continue;
        }
        let color = PALETTE[si % PALETTE.len()];
        let step = plot_width() / s.ys.len().max(2) as f64;
        let points: Vec<String> = s
            .ys
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                format!(
                    "{:.2},{:.2}",
                    MARGIN_LEFT + step * (i as f64 + 0.5),
                    scale_y(y, min, max)
                )
            })
            .collect();
        let _ = write!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
            points.join(" ")
        );
    }
}

fn draw_scatter(svg: &mut String, series: &[&CachedSeries], connect: bool) {
    let (ymin, ymax) = value_range(series);
    let mut xmin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    for s in series {
        for &x in &s.xs {
            xmin = xmin.min(x);
            xmax = xmax.max(x);
        }
    }
    if !xmin.is_finite() || xmin == xmax {
        xmin = 0.0;
        xmax = 1.0;
    }

    for (si, s) in series.iter().enumerate() {
        let color = PALETTE[si % PALETTE.len()];
        let mut points = Vec::new();
        for (&x, &y) in s.xs.iter().zip(&s.ys) {
            let px = MARGIN_LEFT + plot_width() * (x - xmin) / (xmax - xmin);
            let py = scale_y(y, ymin, ymax);
            let _ = write!(
                svg,
                r#"<circle cx="{px:.2}" cy="{py:.2}" r="3" fill="{color}"/>"#
            );
            points.push(format!("{px:.2},{py:.2}"));
        }
        if connect && points.len() > 1 {
            let _ = write!(
                svg,
                r#"<polyline points="{}" fill="none" stroke="{color}"/>"#,
                points.join(" ")
            );
        }
    }
}

fn draw_pie(svg: &mut String, series: &[&CachedSeries], doughnut: bool) {
    let Some(first) = series.first() else {
        return;
    };
    let total: f64 = first.ys.iter().filter(|y| **y > 0.0).sum();
    if total <= 0.0 {
        return;
    }
    let cx = WIDTH / 2.0;
    let cy = MARGIN_TOP + plot_height() / 2.0;
    let r = plot_height() / 2.0 - 10.0;

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, &y) in first.ys.iter().filter(|y| **y > 0.0).enumerate() {
        let sweep = y / total * std::f64::consts::TAU;
        let (x0, y0) = (cx + r * angle.cos(), cy + r * angle.sin());
        let end = angle + sweep;
        let (x1, y1) = (cx + r * end.cos(), cy + r * end.sin());
        let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
        let color = PALETTE[i % PALETTE.len()];
        let _ = write!(
            svg,
            r#"<path d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2} Z" fill="{color}" stroke="white"/>"#
        );
        angle = end;
    }
    if doughnut {
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="white"/>"#,
            r * 0.5
        );
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
