//! Core type definitions for graph construction

use std::fmt;
use std::str::FromStr;

/// Weight given to edges built without an explicit weight
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Construction flags of a graph
///
/// Both flags are fixed when the store is created and never change.
/// `weighted` is informational: weights are always stored on edges but the
/// path query ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GraphConfig {
    /// Edges are one-way; no mirror edge is inserted
    pub directed: bool,

    /// Edge weights are meaningful to the caller
    pub weighted: bool,
}

impl GraphConfig {
    pub fn new(directed: bool, weighted: bool) -> Self {
        GraphConfig { directed, weighted }
    }

    pub fn kind(&self) -> GraphKind {
        match (self.directed, self.weighted) {
            (false, false) => GraphKind::Simple,
            (false, true) => GraphKind::Weighted,
            (true, false) => GraphKind::Directed,
            (true, true) => GraphKind::DirectedWeighted,
        }
    }
}

impl From<GraphKind> for GraphConfig {
    fn from(kind: GraphKind) -> Self {
        match kind {
            GraphKind::Simple => GraphConfig::new(false, false),
            GraphKind::Weighted => GraphConfig::new(false, true),
            GraphKind::Directed => GraphConfig::new(true, false),
            GraphKind::DirectedWeighted => GraphConfig::new(true, true),
        }
    }
}

/// The four graph variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphKind {
    /// Undirected and unweighted
    #[default]
    Simple,
    /// Undirected and weighted
    Weighted,
    /// Directed and unweighted
    Directed,
    /// Directed and weighted
    DirectedWeighted,
}

impl GraphKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Simple => "simple",
            GraphKind::Weighted => "weighted",
            GraphKind::Directed => "directed",
            GraphKind::DirectedWeighted => "directed-weighted",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no known graph kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown graph kind: {0}")]
pub struct UnknownGraphKind(pub String);

impl FromStr for GraphKind {
    type Err = UnknownGraphKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(GraphKind::Simple),
            "weighted" => Ok(GraphKind::Weighted),
            "directed" => Ok(GraphKind::Directed),
            "directed-weighted" | "directed_weighted" => Ok(GraphKind::DirectedWeighted),
            other => Err(UnknownGraphKind(other.to_string())),
        }
    }
}
