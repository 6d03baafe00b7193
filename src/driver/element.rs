//! The narrow "locate a UI element" interface.
//!
//! The console's DOM changes between releases, so every element the flow
//! touches is named by a [`Target`]: a primary strategy plus an optional
//! degraded fallback. Orchestration code never sees raw selectors.

use std::fmt;

use chromiumoxide::{Element, Page};

use super::DriverError;
use crate::util::contains_ci;

/// How to find one element.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// CSS selector, passed through as-is.
    Css(&'static str),
    /// First element with the given tag whose inner text contains `needle`
    /// (case-insensitive).
    Text {
        tag: &'static str,
        needle: &'static str,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Css(sel) => write!(f, "css `{sel}`"),
            Strategy::Text { tag, needle } => write!(f, "<{tag}> containing {needle:?}"),
        }
    }
}

/// A named UI element with its selector strategies.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    /// Human-readable name used in messages and errors.
    pub what: &'static str,
    pub primary: Strategy,
    pub fallback: Option<Strategy>,
}

/// Run one strategy against the page.
pub(crate) async fn locate(page: &Page, strategy: &Strategy) -> Result<Element, DriverError> {
    match strategy {
        Strategy::Css(sel) => page
            .find_element(*sel)
            .await
            .map_err(|_| DriverError::ElementNotFound(strategy.to_string())),
        Strategy::Text { tag, needle } => {
            let candidates = page
                .find_elements(*tag)
                .await
                .map_err(|_| DriverError::ElementNotFound(strategy.to_string()))?;
            for el in candidates {
                if let Ok(Some(text)) = el.inner_text().await {
                    if contains_ci(&text, needle) {
                        return Ok(el);
                    }
                }
            }
            Err(DriverError::ElementNotFound(strategy.to_string()))
        }
    }
}
