//! SVG chart rendering for the totals and projection views.

use crate::domain::settings::CHART_PADDING;
use crate::domain::transaction::Kind;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const PADDING: f64 = CHART_PADDING;

fn kind_color(kind: Kind) -> &'static str {
    match kind {
        Kind::Income => "green",
        Kind::Expense => "red",
    }
}

fn svg_open(width: f64, height: f64, title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <rect width="{w:.0}" height="{h:.0}" fill="white"/>
  <text x="{cx:.1}" y="{ty:.1}" text-anchor="middle" font-size="16">{title}</text>
"#,
        w = width,
        h = height,
        cx = width / 2.0,
        ty = PADDING / 2.0,
        title = title,
    )
}

fn axes(width: f64, height: f64, x_label: &str, y_label: &str) -> String {
    let bottom = height - PADDING;
    let right = width - PADDING;
    format!(
        r#"  <line x1="{p:.1}" y1="{p:.1}" x2="{p:.1}" y2="{b:.1}" stroke="black"/>
  <line x1="{p:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/>
  <text x="{cx:.1}" y="{xl:.1}" text-anchor="middle" font-size="12">{x_label}</text>
  <text x="{yl:.1}" y="{cy:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 {yl:.1} {cy:.1})">{y_label}</text>
"#,
        p = PADDING,
        b = bottom,
        r = right,
        cx = width / 2.0,
        xl = height - PADDING / 4.0,
        yl = PADDING / 3.0,
        cy = height / 2.0,
        x_label = x_label,
        y_label = y_label,
    )
}

/// Bar chart of total amount per kind, income in green and expense in red.
pub fn format_totals_chart(sums: &BTreeMap<Kind, f64>, width: f64, height: f64) -> String {
    if sums.is_empty() {
        return "No totals available.".to_string();
    }

    let plot_width = width - 2.0 * PADDING;
    let plot_height = height - 2.0 * PADDING;
    let max_total = sums.values().copied().fold(0.0_f64, f64::max);
    let scale_y = if max_total > 0.0 {
        plot_height / max_total
    } else {
        0.0
    };

    let slot = plot_width / sums.len() as f64;
    let bar_width = slot * 0.6;

    let mut svg = svg_open(width, height, "Income vs. Expenses");
    svg.push_str(&axes(width, height, "Kind", "Amount"));

    for (i, (kind, total)) in sums.iter().enumerate() {
        let bar_height = total * scale_y;
        let x = PADDING + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = height - PADDING - bar_height;
        svg.push_str(&format!(
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>
  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>
  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{:.2}</text>
"#,
            x,
            y,
            bar_width,
            bar_height,
            kind_color(*kind),
            x + bar_width / 2.0,
            height - PADDING + 15.0,
            kind,
            x + bar_width / 2.0,
            y - 5.0,
            total,
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Line chart of per-day expense totals with the daily average as a dashed line.
pub fn format_projection_chart(
    daily_totals: &BTreeMap<NaiveDate, f64>,
    daily_average: f64,
    width: f64,
    height: f64,
) -> String {
    if daily_totals.is_empty() {
        return "No expense data available.".to_string();
    }

    let plot_width = width - 2.0 * PADDING;
    let plot_height = height - 2.0 * PADDING;
    let max_value = daily_totals
        .values()
        .copied()
        .fold(daily_average, f64::max);
    let scale_y = if max_value > 0.0 {
        plot_height / max_value
    } else {
        0.0
    };
    let scale_x = if daily_totals.len() > 1 {
        plot_width / (daily_totals.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = daily_totals
        .values()
        .enumerate()
        .map(|(i, total)| {
            let x = PADDING + i as f64 * scale_x;
            let y = height - PADDING - total * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let average_y = height - PADDING - daily_average * scale_y;
    let first = daily_totals.keys().next().map(|d| d.to_string()).unwrap_or_default();
    let last = daily_totals.keys().next_back().map(|d| d.to_string()).unwrap_or_default();

    let mut svg = svg_open(width, height, "Expense Projection");
    svg.push_str(&axes(width, height, "Date", "Amount"));
    svg.push_str(&format!(
        r#"  <polyline points="{}" fill="none" stroke="red" stroke-width="1.5"/>
  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="blue" stroke-dasharray="6 4"/>
  <text x="{:.1}" y="{:.1}" text-anchor="start" font-size="10">{}</text>
  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10">{}</text>
  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="red">History</text>
  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="blue">Daily average</text>
"#,
        points.join(" "),
        PADDING,
        average_y,
        width - PADDING,
        average_y,
        PADDING,
        height - PADDING + 15.0,
        first,
        width - PADDING,
        height - PADDING + 15.0,
        last,
        width - PADDING,
        PADDING + 12.0,
        width - PADDING,
        PADDING + 26.0,
    ));
    svg.push_str("</svg>\n");
    svg
}
