//! Regex-based bookmark filter.
//!
//! # Responsibility
//! - Compile user-typed filter text into a case-insensitive matcher.
//! - Match groups by name and items by resolved asset name or path.
//!
//! # Invariants
//! - Blank filter text compiles to "no filter", never to match-nothing.
//! - Items without a resolvable asset never match.
//! - Invalid patterns are reported, not raised mid-render.

use crate::model::bookmark::{Group, Item};
use crate::resolve::AssetResolver;
use regex::{Regex, RegexBuilder};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for filter compilation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors from compiling user filter text.
#[derive(Debug)]
pub enum FilterError {
    /// Filter text is not a valid regular expression.
    InvalidPattern { pattern: String, message: String },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid filter pattern `{pattern}`: {message}")
            }
        }
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPattern { .. } => None,
        }
    }
}

/// Compiled case-insensitive filter over bookmark rows.
#[derive(Debug, Clone)]
pub struct Filter {
    pattern: Regex,
}

impl Filter {
    /// Compiles filter text.
    ///
    /// Returns `Ok(None)` for text that is blank after trimming, meaning no
    /// filtering should happen at all.
    pub fn compile(text: &str) -> FilterResult<Option<Self>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let pattern = RegexBuilder::new(trimmed)
            .case_insensitive(true)
            .build()
            .map_err(|err| FilterError::InvalidPattern {
                pattern: trimmed.to_string(),
                message: err.to_string(),
            })?;
        Ok(Some(Self { pattern }))
    }

    /// Matches a group by its name.
    pub fn matches_group(&self, group: &Group) -> bool {
        self.pattern.is_match(&group.name)
    }

    /// Matches an item by its resolved asset name or full asset path.
    ///
    /// Items whose asset cannot be resolved never match.
    pub fn matches_item(&self, item: &Item, resolver: &impl AssetResolver) -> bool {
        let Some(path) = item.handle.and_then(|handle| resolver.path_of(handle)) else {
            return false;
        };
        self.pattern.is_match(path.name()) || self.pattern.is_match(path.as_str())
    }

    /// Matches a bare display name, used for expanded folder children.
    pub fn matches_name(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}
