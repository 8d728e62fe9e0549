//! Listing filters for ads and proposals.
//!
//! Query-string values arrive as optional raw strings. Each one becomes a
//! [`Filter`]: no restriction, an exact value, or a value that can never
//! match (an unrecognised category, a non-numeric id). Unrecognised values
//! produce an empty listing instead of an error.
//!
//! Filters are applied in a fixed order and always AND-combined:
//!
//! - ads: text -> category -> condition
//! - proposals: sender -> receiver -> status

use std::str::FromStr;

use crate::ad::{Category, Condition};
use crate::proposal::ProposalStatus;
use crate::types::DbId;

/// One parsed query-string criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T> {
    /// Parameter absent or empty.
    Any,
    /// Restrict to exactly this value.
    Only(T),
    /// Parameter present but not a valid value; nothing can match.
    NoMatch,
}

impl<T: FromStr> Filter<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Any,
            Some(value) => value.parse().map_or(Self::NoMatch, Self::Only),
        }
    }
}

impl<T> Filter<T> {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    /// The exact value to restrict on, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Only(value) => Some(value),
            Self::Any | Self::NoMatch => None,
        }
    }
}

/// Ad listing criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdFilter {
    /// Case-insensitive substring matched against title OR description.
    pub text: Option<String>,
    pub category: Filter<Category>,
    pub condition: Filter<Condition>,
}

impl AdFilter {
    pub fn from_params(q: Option<&str>, category: Option<&str>, condition: Option<&str>) -> Self {
        Self {
            text: q.filter(|q| !q.is_empty()).map(str::to_string),
            category: Filter::parse(category),
            condition: Filter::parse(condition),
        }
    }

    /// True when some criterion can never match, so the result is empty.
    pub fn is_unsatisfiable(&self) -> bool {
        self.category.is_no_match() || self.condition.is_no_match()
    }
}

/// Proposal listing criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalFilter {
    pub sender: Filter<DbId>,
    pub receiver: Filter<DbId>,
    pub status: Filter<ProposalStatus>,
}

impl ProposalFilter {
    pub fn from_params(
        sender: Option<&str>,
        receiver: Option<&str>,
        status: Option<&str>,
    ) -> Self {
        Self {
            sender: Filter::parse(sender),
            receiver: Filter::parse(receiver),
            status: Filter::parse(status),
        }
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.sender.is_no_match() || self.receiver.is_no_match() || self.status.is_no_match()
    }
}
