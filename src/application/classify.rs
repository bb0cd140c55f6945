//! Engine classifier
//!
//! Decides which terminal family a target belongs to by looking at the type
//! names in its component tree.

use tracing::debug;

use crate::domain::config::AppConfig;
use crate::domain::delivery::EngineVariant;
use crate::host::ObjectRef;

use super::probe::{type_name_of, walk, ProbeLimits};

/// Type-name fragments identifying each engine family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSets {
    pub modern: Vec<String>,
    pub classic: Vec<String>,
}

impl TokenSets {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            modern: config.modern_tokens(),
            classic: config.classic_tokens(),
        }
    }

    pub fn is_modern(&self, type_name: &str) -> bool {
        self.modern.iter().any(|t| type_name.contains(t.as_str()))
    }

    pub fn is_classic(&self, type_name: &str) -> bool {
        self.classic.iter().any(|t| type_name.contains(t.as_str()))
    }

    /// True if the name belongs to either family
    pub fn is_terminal(&self, type_name: &str) -> bool {
        self.is_modern(type_name) || self.is_classic(type_name)
    }
}

impl Default for TokenSets {
    fn default() -> Self {
        Self::from_config(&AppConfig::empty())
    }
}

/// Pure function of a target's component tree
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    tokens: TokenSets,
    limits: ProbeLimits,
}

impl Classifier {
    pub fn new(tokens: TokenSets, limits: ProbeLimits) -> Self {
        Self { tokens, limits }
    }

    pub fn tokens(&self) -> &TokenSets {
        &self.tokens
    }

    /// Concrete type names of the tree in depth-first order
    pub fn collect_type_names(&self, root: &ObjectRef) -> Vec<String> {
        walk(root, self.limits)
            .iter()
            .filter_map(|visited| type_name_of(visited.node.as_ref()))
            .collect()
    }

    /// Modern tokens win over classic ones when both are present.
    pub fn classify(&self, root: &ObjectRef) -> EngineVariant {
        let names = self.collect_type_names(root);

        let variant = if names.iter().any(|n| self.tokens.is_modern(n)) {
            EngineVariant::ModernBlock
        } else if names.iter().any(|n| self.tokens.is_classic(n)) {
            EngineVariant::Classic
        } else {
            EngineVariant::Unknown
        };

        debug!(nodes = names.len(), %variant, "target classified");
        variant
    }
}
