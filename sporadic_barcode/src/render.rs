use std::fmt::Write;

use crate::config::BarcodeConfig;
use crate::pattern::generate_bars;
use crate::types::Bar;

pub fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the band as a standalone SVG: a background rect, then one full-height rect per bar.
pub fn render_svg(cfg: &BarcodeConfig, bars: &[Bar]) -> String {
    let width = cfg.clamped().width;
    let height = cfg.render_height();
    let ink = escape_attr(&cfg.ink);
    let mut svg = String::with_capacity(128 + bars.len() * 64);

    svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"");
    if let Some(class) = &cfg.class_name {
        let _ = write!(svg, " class=\"{}\"", escape_attr(class));
    }
    let _ = writeln!(svg, " viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\" aria-hidden=\"true\">", width, height);
    let _ = writeln!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        width,
        height,
        escape_attr(&cfg.bg)
    );
    for bar in bars {
        let _ = writeln!(
            svg,
            "  <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            bar.offset, bar.width, height, ink
        );
    }
    svg.push_str("</svg>\n");
    svg
}

pub fn render_config_svg(cfg: &BarcodeConfig) -> String { render_svg(cfg, &generate_bars(cfg)) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BarKind;

    #[test]
    fn renders_background_and_bars() {
        let cfg = BarcodeConfig { width: 30.0, height: 12.0, ..BarcodeConfig::default() };
        let bars = [Bar::new(0, 5, BarKind::Regular), Bar::new(17, 2, BarKind::Regular)];
        let svg = render_svg(&cfg, &bars);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 30 12\""));
        assert!(svg.contains("preserveAspectRatio=\"none\" aria-hidden=\"true\""));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"30\" height=\"12\" fill=\"var(--bar-surface)\"/>"));
        assert!(svg.contains("<rect x=\"17\" y=\"0\" width=\"2\" height=\"12\" fill=\"var(--bar-ink)\"/>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn class_and_colors_are_escaped() {
        let cfg = BarcodeConfig {
            ink: "\"><script>".into(),
            class_name: Some("band & strip".into()),
            ..BarcodeConfig::default()
        };
        let svg = render_svg(&cfg, &[Bar::new(0, 1, BarKind::Regular)]);
        assert!(svg.contains("class=\"band &amp; strip\""));
        assert!(svg.contains("fill=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn non_finite_geometry_renders_defaults() {
        let cfg = BarcodeConfig { width: f64::NAN, height: f64::NEG_INFINITY, ..BarcodeConfig::default() };
        let svg = render_svg(&cfg, &[]);
        assert!(svg.contains("viewBox=\"0 0 1200 96\""));
    }

    #[test]
    fn config_render_is_stable() {
        let cfg = BarcodeConfig::with_seed("home");
        let svg = render_config_svg(&cfg);
        assert_eq!(svg, render_config_svg(&cfg));
        assert_eq!(svg.matches("<rect").count(), 87);
    }
}
