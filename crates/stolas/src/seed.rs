//! Built-in FAQ corpus loaded at startup.

use std::sync::Arc;

use paimon_core::{Passage, Result};

use crate::store::PassageStore;

/// Built-in question/answer pairs, in seeding order.
pub const SEED_FAQS: &[(&str, &str)] = &[
    (
        "How to reset my password?",
        "You can reset your password via the 'Forgot Password' link on the login page.",
    ),
    (
        "What is the refund policy?",
        "We offer a 30-day refund policy for unused services and unopened products.",
    ),
    (
        "How to contact support?",
        "Reach our support team via support@example.com or the help center chat.",
    ),
    (
        "Where can I view my invoices?",
        "Invoices are available in your account under Billing > Invoices.",
    ),
    (
        "Do you support SSO?",
        "Yes, SSO via SAML and OAuth2 is supported on enterprise plans.",
    ),
];

/// Formats a question/answer pair as passage text.
#[must_use]
pub fn faq_text(question: &str, answer: &str) -> String {
    format!("Q: {question}\nA: {answer}")
}

/// Source label for the seed entry at 1-based position `index`.
#[must_use]
pub fn seed_source(index: usize) -> String {
    format!("seed_faq_{index}")
}

/// Returns the seed corpus as `(text, source)` pairs.
#[must_use]
pub fn seed_entries() -> Vec<(String, String)> {
    SEED_FAQS
        .iter()
        .enumerate()
        .map(|(i, (q, a))| (faq_text(q, a), seed_source(i + 1)))
        .collect()
}

/// Loads the seed corpus into `store`.
///
/// # Errors
///
/// Returns an error if the store rejects an entry.
pub fn seed_store(store: &dyn PassageStore) -> Result<Vec<Arc<Passage>>> {
    let added = store.extend(seed_entries())?;
    tracing::info!(passages = added.len(), "Seeded FAQ corpus");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn test_seed_store() {
        let store = InMemoryStore::new();
        let added = seed_store(&store).unwrap();

        assert_eq!(added.len(), SEED_FAQS.len());
        assert_eq!(store.len(), SEED_FAQS.len());

        let first = &store.list()[0];
        assert_eq!(first.source, "seed_faq_1");
        assert!(first.text.starts_with("Q: How to reset my password?\nA: "));
    }

    #[test]
    fn test_seed_sources_are_one_based() {
        let sources: Vec<_> = seed_entries().into_iter().map(|(_, s)| s).collect();
        assert_eq!(
            sources,
            vec!["seed_faq_1", "seed_faq_2", "seed_faq_3", "seed_faq_4", "seed_faq_5"]
        );
    }
}
