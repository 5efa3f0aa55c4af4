use std::collections::HashMap;
use std::sync::Arc;

use crate::config::BarcodeConfig;
use crate::pattern::{generate_pattern, BarPattern};

/// Composite memo key: the seed plus the exact bit pattern of every numeric input.
/// Rendering-only fields (height, colors, class) are not part of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternKey {
    seed: String,
    numbers: [u64; 7],
}

impl PatternKey {
    pub fn of(cfg: &BarcodeConfig) -> Self {
        Self {
            seed: cfg.seed.clone(),
            numbers: [
                cfg.width.to_bits(),
                cfg.density.to_bits(),
                cfg.min_bar.to_bits(),
                cfg.max_bar.to_bits(),
                cfg.min_gap.to_bits(),
                cfg.max_gap.to_bits(),
                cfg.cluster_chance.to_bits(),
            ],
        }
    }
}

#[derive(Debug, Default)]
pub struct PatternCache {
    entries: HashMap<PatternKey, Arc<BarPattern>>,
    hits: u64,
    misses: u64,
}

impl PatternCache {
    pub fn new() -> Self { Self::default() }

    pub fn get_or_generate(&mut self, cfg: &BarcodeConfig) -> Arc<BarPattern> {
        let key = PatternKey::of(cfg);
        if let Some(found) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(found);
        }
        self.misses += 1;
        tracing::debug!(seed = %cfg.seed, width = cfg.width, "barcode cache miss");
        let pattern = Arc::new(generate_pattern(cfg));
        self.entries.insert(key, Arc::clone(&pattern));
        pattern
    }

    pub fn get(&self, cfg: &BarcodeConfig) -> Option<Arc<BarPattern>> { self.entries.get(&PatternKey::of(cfg)).cloned() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn hits(&self) -> u64 { self.hits }

    pub fn misses(&self) -> u64 { self.misses }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_hits() {
        let mut cache = PatternCache::new();
        let cfg = BarcodeConfig::with_seed("work");
        let a = cache.get_or_generate(&cfg);
        let b = cache.get_or_generate(&cfg);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn rendering_fields_share_an_entry() {
        let mut cache = PatternCache::new();
        let cfg = BarcodeConfig::with_seed("work");
        cache.get_or_generate(&cfg);
        let recolored = BarcodeConfig { ink: "#111".into(), height: 40.0, ..cfg.clone() };
        cache.get_or_generate(&recolored);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn numeric_change_regenerates() {
        let mut cache = PatternCache::new();
        let cfg = BarcodeConfig::with_seed("work");
        let a = cache.get_or_generate(&cfg);
        let wider = cache.get_or_generate(&BarcodeConfig { width: 1600.0, ..cfg.clone() });
        let other_seed = cache.get_or_generate(&BarcodeConfig::with_seed("contact"));
        assert_eq!(cache.len(), 3);
        assert_ne!(a.bars, other_seed.bars);
        assert!(wider.extent >= 1600);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cache = PatternCache::new();
        let cfg = BarcodeConfig::with_seed("x");
        cache.get_or_generate(&cfg);
        assert!(cache.get(&cfg).is_some());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&cfg).is_none());
        assert_eq!(cache.misses(), 0);
    }
}
