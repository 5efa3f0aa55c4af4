//! Bar-sequence synthesizer.
//!
//! Walks a cursor from 0 towards the target width, drawing from a seeded
//! generator for every bar and gap. Draw order is part of the output contract:
//! cluster roll, bar width, gap width, doublet roll, then micro gap when a
//! doublet is emitted.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::rng::{unit_f64, Mulberry32};
use crate::types::{Bar, BarKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarPattern {
    pub bars: Vec<Bar>,
    /// Final cursor position: last bar end plus its trailing gap.
    pub extent: u32,
    pub width: f64,
    pub cap: usize,
}

impl BarPattern {
    pub fn is_covered(&self) -> bool { self.extent as f64 >= self.width || self.bars.len() >= self.cap }

    pub fn hit_cap(&self) -> bool { self.bars.len() >= self.cap }

    pub fn len(&self) -> usize { self.bars.len() }

    pub fn is_empty(&self) -> bool { self.bars.is_empty() }
}

pub fn generate_bars(cfg: &BarcodeConfig) -> Vec<Bar> { generate_pattern(cfg).bars }

pub fn generate_pattern(cfg: &BarcodeConfig) -> BarPattern {
    let mut rng = Mulberry32::from_seed_str(&cfg.seed);
    let pattern = generate_bars_with(&cfg.params(), &mut rng);
    tracing::trace!(seed = %cfg.seed, bars = pattern.len(), extent = pattern.extent, "generated barcode");
    if pattern.hit_cap() && (pattern.extent as f64) < pattern.width {
        tracing::warn!(seed = %cfg.seed, cap = pattern.cap, extent = pattern.extent, "barcode hit bar cap before covering width");
    }
    pattern
}

const CAPACITY_HINT: usize = 1024;

fn to_units(v: f64) -> u32 { round_half_up(v) as u32 }

pub fn generate_bars_with<R: RngCore + ?Sized>(p: &BarParams, rng: &mut R) -> BarPattern {
    let cap = p.bar_cap();
    let doublet_w = p.doublet_width() as u32;
    let mut bars = Vec::with_capacity(p.target_bars().min(CAPACITY_HINT));
    let mut x: u32 = 0;

    while (x as f64) < p.width && bars.len() < cap {
        let cluster = unit_f64(rng) < p.cluster_chance;
        let (bar_w, kind) = if cluster {
            let scale = CLUSTER_SCALE_MIN + unit_f64(rng) * CLUSTER_SCALE_SPAN;
            (to_units((p.max_bar + CLUSTER_BOOST) * scale), BarKind::Cluster)
        } else {
            (to_units(p.min_bar + unit_f64(rng) * (p.max_bar - p.min_bar)), BarKind::Regular)
        };
        let gap_w = to_units(p.min_gap + unit_f64(rng) * (p.max_gap - p.min_gap));

        bars.push(Bar::new(x, bar_w, kind));
        x = x.saturating_add(bar_w).saturating_add(gap_w);

        if unit_f64(rng) < DOUBLET_CHANCE {
            let micro_gap = to_units(MICRO_GAP_MIN + unit_f64(rng) * MICRO_GAP_SPAN);
            bars.push(Bar::new(x.saturating_add(micro_gap), doublet_w, BarKind::Doublet));
            x = x.saturating_add(micro_gap).saturating_add(doublet_w);
        }
    }

    BarPattern { bars, extent: x, width: p.width, cap }
}
