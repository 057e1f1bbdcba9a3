//! Name cleaning and variant derivation
//!
//! Every registered name on an identity is cleaned before any query is
//! built:
//! 1. Diacritics removed from first, middle and last name
//! 2. A trailing suffix (Jr, Sr, II, III, MD, PhD and their comma forms)
//!    removed from the last name
//! 3. Compound last names ("Vander Berg", "Garcia-Lopez") split into two
//!    derived names when both halves are at least four characters long

use once_cell::sync::Lazy;
use recite_common::model::{AuthorName, Identity, NameOrigin, NameVariantSet};
use regex::Regex;
use tracing::{debug, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Minimum length of each half of a split compound surname
pub const MIN_SURNAME_PART_LEN: usize = 4;

// Case-insensitive and unanchored on the left: "Fujii" and "Kasr" lose their endings too.
static SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(,Jr|, Jr|, MD PhD|,MD PhD|, MD-PhD|,MD-PhD|, PhD|,PhD|, MD|,MD|, III|,III|, II|,II|, Sr|,Sr|Jr|MD PhD|MD-PhD|PhD|MD|III|II|Sr)$",
    )
    .expect("suffix pattern is valid")
});

static SURNAME_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+|-").expect("separator pattern is valid"));

/// Cleans identity names and derives compound-surname variants
#[derive(Debug, Default, Clone, Copy)]
pub struct NameNormalizer;

impl NameNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Clean every registered name in place and collect the searchable variants
    ///
    /// Primary and alternate names land in `Original`; names whose last name
    /// cleans to nothing are left out. `Derived` is only
    /// populated when a cleaned surname splits into two long enough halves.
    pub fn normalize(&self, identity: &mut Identity) -> NameVariantSet {
        let mut variants = NameVariantSet::new();

        identity.primary_name = clean_name(&identity.primary_name);
        for alternate in identity.alternate_names.iter_mut() {
            *alternate = clean_name(alternate);
        }

        for name in identity.registered_names() {
            if name.last_name.trim().is_empty() {
                warn!(uid = %identity.uid, first_name = %name.first_name, "Skipping name without a last name");
                continue;
            }
            variants.insert(NameOrigin::Original, name.clone());
            if let Some(derived) = derive_additional_names(name) {
                for derived_name in derived {
                    variants.insert(NameOrigin::Derived, derived_name);
                }
            }
        }

        debug!(
            uid = %identity.uid,
            original = variants.len(NameOrigin::Original),
            derived = variants.len(NameOrigin::Derived),
            "Normalized identity names"
        );

        variants
    }
}

/// Accent-free copy of `name` with any suffix removed from the last name
pub fn clean_name(name: &AuthorName) -> AuthorName {
    let first = strip_diacritics(name.first_name.trim());
    let middle = name.middle().map(strip_diacritics);
    let last = strip_suffix(&strip_diacritics(name.last_name.trim()));
    AuthorName::new(first, middle.as_deref(), last)
}

/// Remove combining marks after canonical decomposition ("José" -> "Jose")
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Remove one trailing suffix token and the whitespace it leaves behind
pub fn strip_suffix(last_name: &str) -> String {
    SUFFIX_PATTERN.replace(last_name, "").trim().to_string()
}

/// Split a compound surname into two names sharing first and middle name
///
/// Returns `None` when the surname has no separator or either half is
/// shorter than [`MIN_SURNAME_PART_LEN`].
pub fn derive_additional_names(name: &AuthorName) -> Option<[AuthorName; 2]> {
    let last = name.last_name.trim();
    let mut parts = SURNAME_SEPARATOR.splitn(last, 2);
    let head = parts.next()?.trim();
    let tail = parts.next()?.trim();

    if head.chars().count() < MIN_SURNAME_PART_LEN || tail.chars().count() < MIN_SURNAME_PART_LEN {
        return None;
    }

    let middle = name.middle();
    Some([
        AuthorName::new(name.first_name.clone(), middle, head),
        AuthorName::new(name.first_name.clone(), middle, tail),
    ])
}
