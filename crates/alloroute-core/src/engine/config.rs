use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which penalty policy the enumeration loop uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenaltyKind {
    /// Independent uniform draws between `least` and `-worst` per edge.
    #[default]
    Random,
    /// Symmetric ramp, harshest at the middle of the path.
    Wedge,
}

#[derive(Debug, Error)]
#[error("Invalid penalty policy name (expected 'random' or 'wedge')")]
pub struct ParsePenaltyKindError;

impl FromStr for PenaltyKind {
    type Err = ParsePenaltyKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "wedge" => Ok(Self::Wedge),
            _ => Err(ParsePenaltyKindError),
        }
    }
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Random => "random",
                Self::Wedge => "wedge",
            }
        )
    }
}

/// Options bundle for the path enumeration loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Active penalty policy.
    pub penalty: PenaltyKind,
    /// Revert the previous iteration's penalties once a new path is found,
    /// so only the most recent path's edges stay penalized.
    pub undo: bool,
    /// Maximum number of distinct-sequence iterations to consume.
    pub max_paths: usize,
    /// Worst (harshest) penalty bound; lower is harsher, by convention in (0, 1).
    pub worst: f64,
    /// Least (mildest) penalty bound; by convention in (0, 1).
    pub least: f64,
    /// Residue labels that must all appear in an accepted path.
    /// Empty disables the filter.
    pub must_include: Vec<String>,
    /// Ceiling on consecutive iterations that rediscover the same path
    /// before the loop gives up. Guards against penalty policies that fail
    /// to perturb the search.
    pub max_stalls: usize,
    /// Seed for the random penalty policy; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            penalty: PenaltyKind::Random,
            undo: false,
            max_paths: 10,
            worst: 0.8,
            least: 0.95,
            must_include: Vec::new(),
            max_stalls: 1000,
            seed: None,
        }
    }
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn penalty(mut self, kind: PenaltyKind) -> Self {
        self.config.penalty = kind;
        self
    }
    pub fn undo(mut self, undo: bool) -> Self {
        self.config.undo = undo;
        self
    }
    pub fn max_paths(mut self, n: usize) -> Self {
        self.config.max_paths = n;
        self
    }
    pub fn worst(mut self, worst: f64) -> Self {
        self.config.worst = worst;
        self
    }
    pub fn least(mut self, least: f64) -> Self {
        self.config.least = least;
        self
    }
    pub fn must_include(mut self, labels: Vec<String>) -> Self {
        self.config.must_include = labels;
        self
    }
    pub fn max_stalls(mut self, n: usize) -> Self {
        self.config.max_stalls = n;
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        if self.config.max_stalls == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_stalls",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self.config)
    }
}
