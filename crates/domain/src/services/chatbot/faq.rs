//! FAQ keyword matching.

use crate::models::faq::FaqEntry;

/// Returns the answer of the first active entry with a keyword contained in
/// the message. Entries are tried in the order given.
pub fn match_faq<'a>(message: &str, faqs: &'a [FaqEntry]) -> Option<&'a str> {
    let lower = message.to_lowercase();
    faqs.iter()
        .filter(|faq| faq.is_active)
        .find(|faq| faq.matches(&lower))
        .map(|faq| faq.answer.as_str())
}
