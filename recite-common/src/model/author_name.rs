//! Author name value type
//!
//! Names compare case-insensitively on first, middle and last name. A blank
//! middle name is treated the same as an absent one.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Person name as registered on an identity or listed on an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorName {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl AuthorName {
    pub fn new(first_name: impl Into<String>, middle_name: Option<&str>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            middle_name: middle_name
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            last_name: last_name.into(),
        }
    }

    /// First character of the first name, empty if the first name is blank
    pub fn first_initial(&self) -> String {
        self.first_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// First character of the middle name, if any
    pub fn middle_initial(&self) -> Option<String> {
        self.middle()
            .and_then(|m| m.chars().next())
            .map(|c| c.to_uppercase().collect())
    }

    /// Middle name with blank values collapsed to `None`
    pub fn middle(&self) -> Option<&str> {
        self.middle_name
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Case-insensitive match on first, middle and last name
    pub fn is_full_name_match(&self, other: &AuthorName) -> bool {
        self.key() == other.key()
    }

    /// Case-insensitive match on last name and first initial only
    pub fn is_last_name_and_first_initial_match(&self, other: &AuthorName) -> bool {
        self.last_name.trim().to_lowercase() == other.last_name.trim().to_lowercase()
            && !self.first_initial().is_empty()
            && self.first_initial() == other.first_initial()
    }

    fn key(&self) -> (String, String, String) {
        (
            self.first_name.trim().to_lowercase(),
            self.middle().map(str::to_lowercase).unwrap_or_default(),
            self.last_name.trim().to_lowercase(),
        )
    }
}

impl PartialEq for AuthorName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for AuthorName {}

impl Hash for AuthorName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for AuthorName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AuthorName {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_first, a_middle, a_last) = self.key();
        let (b_first, b_middle, b_last) = other.key();
        (a_last, a_first, a_middle).cmp(&(b_last, b_first, b_middle))
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.middle() {
            Some(middle) => write!(f, "{} {} {}", self.first_name, middle, self.last_name),
            None => write!(f, "{} {}", self.first_name, self.last_name),
        }
    }
}
