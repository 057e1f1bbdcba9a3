//! PubMed query string construction
//!
//! Author terms come in two forms:
//! - initial form: `Smith J[au]`
//! - full form: `Smith John[au]`, optionally with the middle initial
//!
//! Several terms are OR-joined inside parentheses.

use recite_common::model::{AuthorName, Pmid};

/// `Last F[au]`, or `Last[au]` when the first name is blank
///
/// A blank last name yields an empty term, which [`or_group`] drops.
pub fn author_term_initial(name: &AuthorName) -> String {
    if name.last_name.trim().is_empty() {
        return String::new();
    }
    let initial = name.first_initial();
    if initial.is_empty() {
        format!("{}[au]", name.last_name.trim())
    } else {
        format!("{} {}[au]", name.last_name.trim(), initial)
    }
}

/// `Last First[au]`
pub fn author_term_full(name: &AuthorName) -> String {
    let first = name.first_name.trim();
    if first.is_empty() || name.last_name.trim().is_empty() {
        return author_term_initial(name);
    }
    format!("{} {}[au]", name.last_name.trim(), first)
}

/// `Last First M[au]`; same as the full form without a middle name
pub fn author_term_full_with_middle(name: &AuthorName) -> String {
    match name.middle_initial() {
        Some(middle) if !name.first_name.trim().is_empty() && !name.last_name.trim().is_empty() => {
            format!("{} {} {}[au]", name.last_name.trim(), name.first_name.trim(), middle)
        }
        _ => author_term_full(name),
    }
}

/// OR-join distinct terms; parenthesized when there is more than one
pub fn or_group<I>(terms: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut distinct: Vec<String> = Vec::new();
    for term in terms {
        if !term.is_empty() && !distinct.contains(&term) {
            distinct.push(term);
        }
    }

    match distinct.len() {
        0 => None,
        1 => distinct.pop(),
        _ => Some(format!("({})", distinct.join(" OR "))),
    }
}

/// Author clause over every name, using the given term form
pub fn author_clause(names: &[&AuthorName], term: fn(&AuthorName) -> String) -> Option<String> {
    or_group(names.iter().map(|name| term(name)))
}

/// `"value"[tag]` terms OR-joined, blank values skipped
pub fn field_clause(values: &[String], tag: &str) -> Option<String> {
    or_group(
        values
            .iter()
            .map(|v| v.trim().replace('"', ""))
            .filter(|v| !v.is_empty())
            .map(|v| format!("\"{}\"[{}]", v, tag)),
    )
}

/// `author AND field`; `None` unless both clauses exist
pub fn and_query(author: Option<String>, field: Option<String>) -> Option<String> {
    Some(format!("{} AND {}", author?, field?))
}

/// `p1[uid] OR p2[uid] ...`
pub fn gold_standard_query(pmids: &[Pmid]) -> Option<String> {
    if pmids.is_empty() {
        return None;
    }
    Some(
        pmids
            .iter()
            .map(|p| format!("{}[uid]", p))
            .collect::<Vec<_>>()
            .join(" OR "),
    )
}

/// Email addresses joined by `" OR "`, commas replaced with periods
///
/// A single address is returned as is (after cleaning); no addresses
/// builds no query.
pub fn construct_email_query<'a, I>(emails: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let cleaned: Vec<String> = emails
        .into_iter()
        .map(|e| e.trim().replace(',', "."))
        .filter(|e| !e.is_empty())
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(" OR "))
    }
}
