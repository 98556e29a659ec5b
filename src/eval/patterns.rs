//! Pattern catalog for Gomoku evaluation
//!
//! Each pattern is a short run of cell states read along one axis, paired
//! with a signed score. Positive scores favour the engine, negative scores
//! favour the human. The table is built once from both perspectives and is
//! immutable afterwards.

use crate::board::Stone;

/// Scoring tiers. Only the ordering and the ratios below are meaningful.
pub struct PatternScore;

impl PatternScore {
    /// Five in a row
    pub const WIN: i64 = 10_000_000;
    /// Live fours, double-gap fours
    pub const CRITICAL: i64 = 1_000_000;
    /// Gap fours, open threes
    pub const HIGH: i64 = 100_000;
    /// Gap threes, edge shapes
    pub const MEDIUM: i64 = 10_000;
    /// Early development
    pub const LOW: i64 = 1_000;
}

/// `base * percent / 100`, exact for every multiplier used here
const fn pct(base: i64, percent: i64) -> i64 {
    base * percent / 100
}

/// A stone configuration and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub cells: Vec<Stone>,
    pub score: i64,
}

impl Pattern {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Immutable table of every scored pattern.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// Build the merged catalog.
    ///
    /// The human perspective is inserted first, then the engine's. A tuple
    /// inserted twice keeps its first slot and takes the later score, so the
    /// engine-side tuning wins every clash.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Self {
            patterns: Vec::with_capacity(96),
        };
        for player in [Stone::Human, Stone::Ai] {
            catalog.add_perspective(player);
        }
        catalog
    }

    fn add_perspective(&mut self, p: Stone) {
        use PatternScore as S;

        let o = p.opponent();
        let e = Stone::Empty;
        let h = Stone::Human;
        let sign = p.sign();

        // Five
        self.insert(&[p, p, p, p, p], S::WIN * sign);

        // Live and half-open fours
        self.insert(&[e, p, p, p, p, e], S::CRITICAL * sign);
        self.insert(&[p, p, p, p, e], pct(S::CRITICAL, 90) * sign);
        self.insert(&[e, p, p, p, p], pct(S::CRITICAL, 90) * sign);
        self.insert(&[o, p, p, p, p, e], pct(S::CRITICAL, 90) * sign);
        self.insert(&[e, p, p, p, p, o], pct(S::CRITICAL, 90) * sign);

        // Gap fours; XX_XX is the hardest to block
        self.insert(&[p, e, p, p, p], pct(S::HIGH, 120) * sign);
        self.insert(&[p, p, e, p, p], pct(S::HIGH, 150) * sign);
        self.insert(&[p, p, p, e, p], pct(S::HIGH, 120) * sign);

        // Double-gap shapes that threaten two fours at once
        self.insert(&[p, e, p, e, p, p], S::CRITICAL * sign);
        self.insert(&[p, p, e, p, e, p], S::CRITICAL * sign);

        // Split threes
        self.insert(&[p, e, p, e, p], pct(S::HIGH, 180) * sign);
        self.insert(&[e, p, e, p, e], pct(S::HIGH, 150) * sign);

        // Open threes
        self.insert(&[e, p, p, p, e], pct(S::HIGH, 200) * sign);
        self.insert(&[e, e, p, p, p, e], pct(S::HIGH, 150) * sign);

        // Gap threes
        self.insert(&[p, e, p, p], S::MEDIUM * sign);
        self.insert(&[p, p, e, p], S::MEDIUM * sign);

        // Opponent fours: blocking outweighs attacking
        self.insert(&[e, o, o, o, o, e], -pct(S::CRITICAL, 250) * sign);
        self.insert(&[o, o, o, o, e], -pct(S::CRITICAL, 250) * sign);
        self.insert(&[e, o, o, o, o], -pct(S::CRITICAL, 250) * sign);
        self.insert(&[p, o, o, o, o, e], -pct(S::CRITICAL, 200) * sign);
        self.insert(&[e, o, o, o, o, p], -pct(S::CRITICAL, 200) * sign);
        self.insert(&[o, o, o, o, p], -pct(S::CRITICAL, 200) * sign);
        self.insert(&[p, o, o, o, o], -pct(S::CRITICAL, 200) * sign);

        // Opponent gap fours
        self.insert(&[o, e, o, o, o], -pct(S::WIN, 120) * sign);
        self.insert(&[o, o, e, o, o], -pct(S::WIN, 150) * sign);
        self.insert(&[e, o, e, o, o, o], -pct(S::WIN, 120) * sign);
        self.insert(&[e, o, o, e, o, o], -pct(S::WIN, 150) * sign);
        self.insert(&[e, o, e, o, o, o, e], -pct(S::WIN, 120) * sign);
        self.insert(&[e, o, o, e, o, o, e], -pct(S::WIN, 150) * sign);
        self.insert(&[o, e, o, o, o, e], -pct(S::WIN, 120) * sign);
        self.insert(&[o, o, e, o, o, e], -pct(S::WIN, 150) * sign);

        // Twos
        self.insert(&[e, p, p, e], S::LOW * sign);
        self.insert(&[p, e, e, p], pct(S::LOW, 80) * sign);

        // Edge shapes, anchored on a human stone
        self.insert(&[e, e, p, p, h], pct(S::MEDIUM, 120) * sign);
        self.insert(&[h, p, p, e, e], pct(S::MEDIUM, 120) * sign);
        self.insert(&[e, p, h, p, e], pct(S::MEDIUM, 120) * sign);

        // Corner sacrifices
        self.insert(&[p, h, h, e, p], pct(S::HIGH, 70) * sign);
        self.insert(&[h, p, p, e, h], pct(S::HIGH, 70) * sign);
    }

    fn insert(&mut self, cells: &[Stone], score: i64) {
        match self.patterns.iter_mut().find(|pat| pat.cells == cells) {
            Some(existing) => existing.score = score,
            None => self.patterns.push(Pattern {
                cells: cells.to_vec(),
                score,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Longest pattern in the catalog
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.patterns.iter().map(Pattern::len).max().unwrap_or(0)
    }

    /// Score of an exact tuple, if catalogued
    #[must_use]
    pub fn score_of(&self, cells: &[Stone]) -> Option<i64> {
        self.patterns
            .iter()
            .find(|pat| pat.cells == cells)
            .map(|pat| pat.score)
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Stone = Stone::Ai;
    const H: Stone = Stone::Human;
    const E: Stone = Stone::Empty;

    #[test]
    fn test_tier_hierarchy() {
        assert!(PatternScore::WIN > PatternScore::CRITICAL);
        assert!(PatternScore::CRITICAL > PatternScore::HIGH);
        assert!(PatternScore::HIGH > PatternScore::MEDIUM);
        assert!(PatternScore::MEDIUM > PatternScore::LOW);
    }

    #[test]
    fn test_pattern_lengths() {
        let catalog = PatternCatalog::new();
        assert_eq!(catalog.len(), 61);
        assert!(catalog.iter().all(|p| (4..=7).contains(&p.len())));
        assert_eq!(catalog.max_len(), 7);
    }

    #[test]
    fn test_tuples_are_unique() {
        let catalog = PatternCatalog::new();
        let patterns: Vec<_> = catalog.iter().collect();
        for (i, a) in patterns.iter().enumerate() {
            for b in &patterns[i + 1..] {
                assert_ne!(a.cells, b.cells);
            }
        }
    }

    #[test]
    fn test_fives_are_decisive() {
        let catalog = PatternCatalog::new();
        assert_eq!(catalog.score_of(&[A; 5]), Some(PatternScore::WIN));
        assert_eq!(catalog.score_of(&[H; 5]), Some(-PatternScore::WIN));
    }

    #[test]
    fn test_fours_and_discounts() {
        let catalog = PatternCatalog::new();
        assert_eq!(catalog.score_of(&[E, A, A, A, A, E]), Some(1_000_000));
        assert_eq!(catalog.score_of(&[A, A, A, A, E]), Some(900_000));
        assert_eq!(catalog.score_of(&[H, A, A, A, A, E]), Some(900_000));
        // Engine gap fours; XX_XX scores higher
        assert_eq!(catalog.score_of(&[A, E, A, A, A]), Some(120_000));
        assert_eq!(catalog.score_of(&[A, A, E, A, A]), Some(150_000));
    }

    #[test]
    fn test_blocking_outweighs_attacking() {
        let catalog = PatternCatalog::new();
        let attack = catalog.score_of(&[E, A, A, A, A, E]).unwrap();
        let threat = catalog.score_of(&[E, H, H, H, H, E]).unwrap();
        assert_eq!(threat, -2_500_000);
        assert!(threat.abs() > attack);

        let blocked = catalog.score_of(&[A, H, H, H, H, E]).unwrap();
        assert_eq!(blocked, -2_000_000);
        // Human gap fours are scored beyond a five
        assert_eq!(catalog.score_of(&[H, H, E, H, H]), Some(-15_000_000));
    }

    #[test]
    fn test_low_tier_twos() {
        let catalog = PatternCatalog::new();
        assert_eq!(catalog.score_of(&[E, A, A, E]), Some(1_000));
        assert_eq!(catalog.score_of(&[A, E, E, A]), Some(800));
        assert_eq!(catalog.score_of(&[H, E, E, H]), Some(-800));
    }

    #[test]
    fn test_later_insert_overrides_score() {
        let catalog = PatternCatalog::new();
        // The human edge shape lands on the human open-three tuple
        assert_eq!(catalog.score_of(&[E, H, H, H, E]), Some(-12_000));
        assert_eq!(catalog.score_of(&[E, A, A, A, E]), Some(200_000));
    }

    #[test]
    fn test_catalog_is_deterministic() {
        let a = PatternCatalog::new();
        let b = PatternCatalog::new();
        assert_eq!(a.patterns, b.patterns);
    }
}
