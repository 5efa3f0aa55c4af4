use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::BarcodeError;

pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 96.0;
pub const DEFAULT_INK: &str = "var(--bar-ink)";
pub const DEFAULT_BG: &str = "var(--bar-surface)";
pub const DEFAULT_DENSITY: f64 = 7.0;
pub const DEFAULT_MIN_BAR: f64 = 2.0;
pub const DEFAULT_MAX_BAR: f64 = 8.0;
pub const DEFAULT_MIN_GAP: f64 = 3.0;
pub const DEFAULT_MAX_GAP: f64 = 14.0;
pub const DEFAULT_CLUSTER_CHANCE: f64 = 0.2;

pub const DOUBLET_CHANCE: f64 = 0.18;
pub const CLUSTER_BOOST: f64 = 6.0;
pub const CLUSTER_SCALE_MIN: f64 = 0.7;
pub const CLUSTER_SCALE_SPAN: f64 = 0.6;
pub const MICRO_GAP_MIN: f64 = 2.0;
pub const MICRO_GAP_SPAN: f64 = 2.0;
pub const BAR_CAP_SLACK: usize = 200;

// Bounds that keep the u32 cursor from saturating: one iteration advances by
// at most ~3.3 * MAX_SPAN, far below u32::MAX - MAX_EXTENT.
pub const MAX_EXTENT: f64 = (u32::MAX / 4) as f64;
pub const MAX_SPAN: f64 = (1u32 << 24) as f64;
pub const MAX_TARGET_BARS: usize = 1 << 18;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarcodeConfig {
    /// Virtual viewBox width; also the target the bars must cover.
    pub width: f64,
    pub height: f64,
    pub ink: String,
    pub bg: String,
    pub seed: String,
    /// Approximate bars per 100 width units.
    pub density: f64,
    pub min_bar: f64,
    pub max_bar: f64,
    pub min_gap: f64,
    pub max_gap: f64,
    pub cluster_chance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ink: DEFAULT_INK.to_string(),
            bg: DEFAULT_BG.to_string(),
            seed: String::new(),
            density: DEFAULT_DENSITY,
            min_bar: DEFAULT_MIN_BAR,
            max_bar: DEFAULT_MAX_BAR,
            min_gap: DEFAULT_MIN_GAP,
            max_gap: DEFAULT_MAX_GAP,
            cluster_chance: DEFAULT_CLUSTER_CHANCE,
            class_name: None,
        }
    }
}

/// Sanitized numeric inputs of the synthesizer. Every range satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarParams {
    pub width: f64,
    pub density: f64,
    pub min_bar: f64,
    pub max_bar: f64,
    pub min_gap: f64,
    pub max_gap: f64,
    pub cluster_chance: f64,
}

impl Default for BarParams {
    fn default() -> Self { BarcodeConfig::default().params() }
}

fn finite_or(v: f64, fallback: f64) -> f64 { if v.is_finite() { v } else { fallback } }

impl BarcodeConfig {
    pub fn with_seed(seed: impl Into<String>) -> Self { Self { seed: seed.into(), ..Self::default() } }

    pub fn from_json(s: &str) -> serde_json::Result<Self> { serde_json::from_str(s) }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BarcodeError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }

    /// Clamps inverted or out-of-range inputs instead of rejecting them.
    pub fn params(&self) -> BarParams {
        let params = self.clamped();
        let adjusted = self.adjusted_fields(&params);
        if !adjusted.is_empty() {
            tracing::debug!(seed = %self.seed, fields = ?adjusted, "clamped barcode config");
        }
        params
    }

    /// Same values as `params`, without the debug event.
    pub fn clamped(&self) -> BarParams {
        let width = finite_or(self.width, DEFAULT_WIDTH).clamp(0.0, MAX_EXTENT);
        let density = finite_or(self.density, DEFAULT_DENSITY).max(0.0);
        let min_bar = finite_or(self.min_bar, DEFAULT_MIN_BAR).clamp(0.0, MAX_SPAN);
        let max_bar = finite_or(self.max_bar, DEFAULT_MAX_BAR).clamp(min_bar, MAX_SPAN);
        let min_gap = finite_or(self.min_gap, DEFAULT_MIN_GAP).clamp(0.0, MAX_SPAN);
        let max_gap = finite_or(self.max_gap, DEFAULT_MAX_GAP).clamp(min_gap, MAX_SPAN);
        let cluster_chance = finite_or(self.cluster_chance, DEFAULT_CLUSTER_CHANCE).clamp(0.0, 1.0);
        BarParams { width, density, min_bar, max_bar, min_gap, max_gap, cluster_chance }
    }

    pub fn render_height(&self) -> f64 { finite_or(self.height, DEFAULT_HEIGHT).max(0.0) }

    /// Copy with every numeric field replaced by the value actually used, so it
    /// survives JSON (which has no NaN or infinity).
    pub fn sanitized(&self) -> Self {
        let p = self.clamped();
        Self {
            width: p.width,
            height: self.render_height(),
            density: p.density,
            min_bar: p.min_bar,
            max_bar: p.max_bar,
            min_gap: p.min_gap,
            max_gap: p.max_gap,
            cluster_chance: p.cluster_chance,
            ..self.clone()
        }
    }

    fn adjusted_fields(&self, p: &BarParams) -> Vec<&'static str> {
        let pairs = [
            ("width", self.width, p.width),
            ("density", self.density, p.density),
            ("minBar", self.min_bar, p.min_bar),
            ("maxBar", self.max_bar, p.max_bar),
            ("minGap", self.min_gap, p.min_gap),
            ("maxGap", self.max_gap, p.max_gap),
            ("clusterChance", self.cluster_chance, p.cluster_chance),
        ];
        // NaN never equals itself, so replaced NaNs are reported too
        pairs.iter().filter(|(_, raw, used)| raw != used).map(|(name, _, _)| *name).collect()
    }
}

impl BarParams {
    /// Soft bar count; only used to bound iteration.
    pub fn target_bars(&self) -> usize {
        (round_half_up(self.width / 100.0 * self.density) as usize).clamp(1, MAX_TARGET_BARS)
    }

    pub fn bar_cap(&self) -> usize { self.target_bars().saturating_add(BAR_CAP_SLACK) }

    pub fn doublet_width(&self) -> f64 { round_half_up((self.min_bar + self.max_bar) / 2.0).max(self.min_bar) }
}

/// Half-up rounding, the way browsers round layout numbers.
pub fn round_half_up(v: f64) -> f64 { (v + 0.5).floor() }
