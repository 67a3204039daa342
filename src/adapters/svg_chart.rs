//! SVG equity-curve rendering.
//!
//! Takes the already-computed cumulative PnL series; nothing here reads
//! simulation state.

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

/// Render the cumulative-PnL curve as a standalone SVG polyline with a zero
/// baseline. An empty curve renders an empty plot area.
pub fn format_equity_svg(curve: &[f64]) -> String {
    let min_pnl = curve.iter().copied().fold(0.0_f64, f64::min);
    let max_pnl = curve.iter().copied().fold(0.0_f64, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_pnl - min_pnl;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if curve.len() > 1 {
        plot_width / (curve.len() - 1) as f64
    } else {
        0.0
    };

    let to_y = |value: f64| HEIGHT - PADDING - (value - min_pnl) * scale_y;

    let points: Vec<String> = curve
        .iter()
        .enumerate()
        .map(|(i, value)| format!("{:.1},{:.1}", PADDING + i as f64 * scale_x, to_y(*value)))
        .collect();

    let zero_y = to_y(0.0);

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            "\n",
            r#"  <rect width="{w}" height="{h}" fill="white"/>"#,
            "\n",
            r##"  <line x1="{pad}" y1="{zero:.1}" x2="{right}" y2="{zero:.1}" stroke="#999" stroke-dasharray="4 4"/>"##,
            "\n",
            r##"  <polyline points="{points}" fill="none" stroke="#2563eb" stroke-width="1.5"/>"##,
            "\n</svg>\n",
        ),
        w = WIDTH,
        h = HEIGHT,
        pad = PADDING,
        right = WIDTH - PADDING,
        zero = zero_y,
        points = points.join(" "),
    )
}
