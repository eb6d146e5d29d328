//! Identity normalizer
//!
//! Turns mapped [`RawFields`] into a [`NormalizedRecord`]: canonical domain,
//! username/email split, category and secret presence. The password value
//! itself is dropped here.

mod category;
mod domain;
mod identity;

pub use category::{CategoryTable, DEFAULT_CATEGORY_RULES};
pub use domain::{extract_domain, with_default_scheme};
pub use identity::{classify_identity, is_email};

use crate::dialect::SourceDialect;
use crate::model::{Category, NormalizedRecord, RawFields, SkipReason};

/// Normalizer holding the category table it classifies with
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    categories: CategoryTable,
}

impl Normalizer {
    /// Create a normalizer with the built-in category table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a substitute category table
    pub fn with_categories(categories: CategoryTable) -> Self {
        Self { categories }
    }

    /// Category table in use
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Normalize mapped fields into a record
    ///
    /// Fails only when no domain can be derived from the URL.
    pub fn normalize(&self, fields: RawFields, source: SourceDialect) -> Result<NormalizedRecord, SkipReason> {
        let domain = extract_domain(&fields.url);
        if domain.is_empty() {
            return Err(SkipReason::EmptyDomain);
        }

        Ok(NormalizedRecord {
            url: with_default_scheme(&fields.url),
            identity: classify_identity(&fields.username),
            has_secret: !fields.password.is_empty(),
            category: self.categorize(&domain),
            domain,
            source,
        })
    }

    /// Infer a category from a domain
    pub fn categorize(&self, domain: &str) -> Category {
        self.categories.categorize(domain)
    }

    /// Infer a category from a domain plus a page or entry title
    pub fn categorize_with_title(&self, domain: &str, title: &str) -> Category {
        self.categories.categorize(&format!("{} {}", domain, title))
    }
}
