use std::fmt;

use serde::{Deserialize, Serialize};

/// A lookup expression understood by the view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    pub fn css(expr: impl Into<String>) -> Self {
        Self::Css(expr.into())
    }

    pub fn expr(&self) -> &str {
        match self {
            Self::XPath(e) | Self::Css(e) => e,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XPath(e) => write!(f, "xpath:{}", e),
            Self::Css(e) => write!(f, "css:{}", e),
        }
    }
}

/// A named lookup strategy for one logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub locator: Locator,
}

impl Strategy {
    pub fn xpath(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: Locator::xpath(expr),
        }
    }
}

/// Ordered fallback strategies, tried first to last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyChain(Vec<Strategy>);

impl StrategyChain {
    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Strategy> for StrategyChain {
    fn from_iter<I: IntoIterator<Item = Strategy>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
