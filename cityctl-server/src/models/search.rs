//! Search inputs - trimmed terms and entity lookups
//!
//! Query strings arrive from HTML forms, so empty fields are sent as `""`
//! rather than omitted. Everything here treats blank input as absent.

use std::fmt;

use super::ValidationError;

/// A trimmed, non-empty search term.
///
/// Case folding happens in SQL (`UPPER` on both sides) so the database's
/// collation decides what matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    display: String,
}

impl SearchTerm {
    /// Normalize raw user input. Returns `None` for blank input.
    ///
    /// ```
    /// use cityctl_server::models::SearchTerm;
    ///
    /// let term = SearchTerm::new("  Upper West Side ").unwrap();
    /// assert_eq!(term.display(), "Upper West Side");
    /// assert!(SearchTerm::new("   ").is_none());
    /// ```
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            display: trimmed.to_owned(),
        })
    }

    /// The term as the user typed it, trimmed.
    pub fn display(&self) -> &str {
        &self.display
    }
}

/// How a search page picks its entity: a dropdown id or a typed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLookup {
    Id(i32),
    Name(SearchTerm),
}

impl EntityLookup {
    /// Build a lookup from the two optional form fields.
    ///
    /// A selected id wins over a typed name. Returns `Ok(None)` when neither
    /// was supplied.
    pub fn from_fields(
        id: Option<&str>,
        name: Option<&str>,
        id_field: &'static str,
    ) -> Result<Option<Self>, ValidationError> {
        if let Some(id) = parse_optional_id(id, id_field)? {
            return Ok(Some(Self::Id(id)));
        }
        Ok(name.and_then(SearchTerm::new).map(Self::Name))
    }
}

impl fmt::Display for EntityLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Name(term) => f.write_str(term.display()),
        }
    }
}

/// Parse an optional numeric id from a form field; blank means absent.
pub fn parse_optional_id(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<i32>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "must be a whole number",
            }),
    }
}

/// Wrap a term for a SQL `LIKE` substring match, escaping wildcards so user
/// input matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
