use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::render::escape_attr;
use crate::rng::Mulberry32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarfieldConfig {
    pub width: f64,
    pub height: f64,
    pub count: usize,
    pub seed: String,
    pub fill: String,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self { width: 1200.0, height: 84.0, count: 45, seed: String::new(), fill: "white".to_string() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub opacity: f64,
    /// Animation delay, seconds.
    pub delay: f64,
    /// Twinkle period, seconds.
    pub twinkle: f64,
}

pub fn generate_starfield(cfg: &StarfieldConfig) -> Vec<Star> {
    let width = if cfg.width.is_finite() { cfg.width.max(0.0) } else { 0.0 };
    let height = if cfg.height.is_finite() { cfg.height.max(0.0) } else { 0.0 };
    let mut rng = Mulberry32::from_seed_str(&cfg.seed);
    (0..cfg.count)
        .map(|_| Star {
            x: rng.next_f64() * width,
            y: rng.next_f64() * height,
            r: rng.next_f64() * 1.2 + 0.4,
            opacity: rng.next_f64() * 0.5 + 0.3,
            delay: rng.next_f64() * 5.0,
            twinkle: 4.0 + rng.next_f64() * 3.0,
        })
        .collect()
}

pub fn render_starfield_svg(cfg: &StarfieldConfig, stars: &[Star]) -> String {
    let fill = escape_attr(&cfg.fill);
    let mut svg = String::with_capacity(256 + stars.len() * 160);
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\" aria-hidden=\"true\">",
        cfg.width, cfg.height
    );
    svg.push_str("  <defs>\n    <filter id=\"glow\">\n");
    svg.push_str("      <feGaussianBlur stdDeviation=\"1.5\" result=\"coloredBlur\"/>\n");
    svg.push_str("      <feMerge><feMergeNode in=\"coloredBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>\n");
    svg.push_str("    </filter>\n  </defs>\n  <g>\n");
    for s in stars {
        let _ = writeln!(
            svg,
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" opacity=\"{:.3}\" filter=\"url(#glow)\" style=\"animation: star-twinkle {:.2}s ease-in-out infinite; animation-delay: {:.2}s\"/>",
            s.x, s.y, s.r, fill, s.opacity, s.twinkle, s.delay
        );
    }
    svg.push_str("  </g>\n</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> StarfieldConfig { StarfieldConfig { seed: "nav".into(), ..StarfieldConfig::default() } }

    #[test]
    fn reproducible_for_a_seed() {
        assert_eq!(generate_starfield(&nav()), generate_starfield(&nav()));
        let other = StarfieldConfig { seed: "footer".into(), ..StarfieldConfig::default() };
        assert_ne!(generate_starfield(&nav()), generate_starfield(&other));
    }

    #[test]
    fn stars_respect_ranges() {
        let stars = generate_starfield(&nav());
        assert_eq!(stars.len(), 45);
        for s in &stars {
            assert!((0.0..1200.0).contains(&s.x));
            assert!((0.0..84.0).contains(&s.y));
            assert!((0.4..1.6).contains(&s.r));
            assert!((0.3..0.8).contains(&s.opacity));
            assert!((0.0..5.0).contains(&s.delay));
            assert!((4.0..7.0).contains(&s.twinkle));
        }
    }

    #[test]
    fn first_star_uses_first_draws() {
        let cfg = StarfieldConfig { seed: "seed-A".into(), count: 1, ..StarfieldConfig::default() };
        let star = generate_starfield(&cfg)[0];
        assert_eq!(star.x, 0.019495312124490738 * 1200.0);
        assert_eq!(star.y, 0.9470228794962168 * 84.0);
    }

    #[test]
    fn renders_one_circle_per_star() {
        let cfg = StarfieldConfig { count: 3, ..nav() };
        let svg = render_starfield_svg(&cfg, &generate_starfield(&cfg));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("viewBox=\"0 0 1200 84\""));
        assert!(svg.contains("stdDeviation=\"1.5\""));
    }
}
