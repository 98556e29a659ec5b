//! Engine configuration
//!
//! Defaults reproduce the tuned behaviour of the engine; every field can be
//! overridden in code or, for the binary, through `GOMOKU_*` environment
//! variables.

use std::str::FromStr;

use crate::error::ConfigError;

/// Seed for the Zobrist key generator. Same seed = same keys = same hashes.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Tuning for the distant-threat watch of the frontier.
///
/// Human stones farther than `isolation_distance` (Manhattan) from every AI
/// stone are "isolated". When at least `min_isolated` of them exist, the
/// neighbours of the first `max_zones` are seeded with `watch_score`. The
/// scan runs at most once every `interval` plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistantThreatConfig {
    pub interval: u32,
    pub isolation_distance: i32,
    pub min_isolated: usize,
    pub max_zones: usize,
    pub watch_score: i64,
}

impl Default for DistantThreatConfig {
    fn default() -> Self {
        Self {
            interval: 3,
            isolation_distance: 3,
            min_isolated: 2,
            max_zones: 2,
            watch_score: -100,
        }
    }
}

/// Configuration of an [`AIEngine`](crate::AIEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth in plies
    pub depth: u8,
    /// Candidates expanded per node
    pub candidate_limit: usize,
    pub zobrist_seed: u64,
    /// Consult and fill the transposition table
    pub use_transposition: bool,
    pub distant: DistantThreatConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            candidate_limit: 5,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
            use_transposition: true,
            distant: DistantThreatConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with `GOMOKU_DEPTH`, `GOMOKU_CANDIDATES`,
    /// `GOMOKU_SEED` and `GOMOKU_TT` (0 or 1).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(depth) = parse_var(&lookup, "GOMOKU_DEPTH")? {
            config.depth = depth;
        }
        if let Some(limit) = parse_var(&lookup, "GOMOKU_CANDIDATES")? {
            config.candidate_limit = limit;
        }
        if let Some(seed) = parse_var(&lookup, "GOMOKU_SEED")? {
            config.zobrist_seed = seed;
        }
        if let Some(flag) = parse_var::<u8, _>(&lookup, "GOMOKU_TT")? {
            config.use_transposition = match flag {
                0 => false,
                1 => true,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "GOMOKU_TT",
                        value: flag.to_string(),
                    })
                }
            };
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never produce a move
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.candidate_limit == 0 {
            return Err(ConfigError::ZeroCandidates);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit;
        self
    }

    #[must_use]
    pub fn with_transposition(mut self, enabled: bool) -> Self {
        self.use_transposition = enabled;
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, 4);
        assert_eq!(config.candidate_limit, 5);
        assert!(config.use_transposition);
        assert_eq!(config.distant.interval, 3);
        assert_eq!(config.distant.isolation_distance, 3);
        assert_eq!(config.distant.watch_score, -100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("GOMOKU_DEPTH", "2"),
            ("GOMOKU_CANDIDATES", " 8 "),
            ("GOMOKU_SEED", "42"),
            ("GOMOKU_TT", "0"),
        ]))
        .unwrap();

        assert_eq!(config.depth, 2);
        assert_eq!(config.candidate_limit, 8);
        assert_eq!(config.zobrist_seed, 42);
        assert!(!config.use_transposition);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = EngineConfig::from_lookup(lookup_from(&[("GOMOKU_DEPTH", "deep")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "GOMOKU_DEPTH",
                value: "deep".to_string()
            }
        );

        let err = EngineConfig::from_lookup(lookup_from(&[("GOMOKU_TT", "7")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "GOMOKU_TT", .. }));
    }

    #[test]
    fn test_validate_zero_values() {
        assert_eq!(
            EngineConfig::default().with_depth(0).validate(),
            Err(ConfigError::ZeroDepth)
        );
        assert_eq!(
            EngineConfig::default().with_candidate_limit(0).validate(),
            Err(ConfigError::ZeroCandidates)
        );
        let err = EngineConfig::from_lookup(lookup_from(&[("GOMOKU_DEPTH", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDepth);
    }
}
