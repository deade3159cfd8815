//! Contact query matching.
//!
//! A query is split on whitespace; a contact matches when every token fuzzily
//! matches (in-order subsequence, case-insensitive) its first or last name.
//! An empty or whitespace-only query matches everything.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::contact::Contact;

/// Compiled contact query.
pub struct ContactQuery {
    tokens: Vec<String>,
    matcher: SkimMatcherV2,
}

impl ContactQuery {
    pub fn new(query: &str) -> Self {
        Self {
            tokens: query.split_whitespace().map(str::to_lowercase).collect(),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Whether the query filters anything at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        [contact.first.as_deref(), contact.last.as_deref()]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .any(|field| {
                self.tokens
                    .iter()
                    .all(|token| self.matcher.fuzzy_match(&field, token).is_some())
            })
    }
}

/// Keep the contacts that match `query`, preserving order.
///
/// `None` and `Some("")` both leave the list untouched.
pub fn filter_contacts(contacts: Vec<Contact>, query: Option<&str>) -> Vec<Contact> {
    let Some(query) = query.map(ContactQuery::new).filter(|q| !q.is_empty()) else {
        return contacts;
    };
    contacts.into_iter().filter(|c| query.matches(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: Option<&str>, last: Option<&str>) -> Contact {
        Contact {
            first: first.map(str::to_string),
            last: last.map(str::to_string),
            ..Contact::empty()
        }
    }

    fn sample() -> Vec<Contact> {
        vec![
            contact(Some("Shruti"), Some("Kapoor")),
            contact(Some("Glenn"), Some("Reyes")),
            contact(Some("Ryan"), Some("Florence")),
            contact(None, None),
        ]
    }

    fn firsts(contacts: &[Contact]) -> Vec<Option<&str>> {
        contacts.iter().map(|c| c.first.as_deref()).collect()
    }

    #[test]
    fn none_and_empty_query_keep_everything() {
        assert_eq!(filter_contacts(sample(), None).len(), 4);
        assert_eq!(filter_contacts(sample(), Some("")).len(), 4);
        assert_eq!(filter_contacts(sample(), Some("   ")).len(), 4);
    }

    #[test]
    fn substring_matches_case_insensitively() {
        let out = filter_contacts(sample(), Some("KAP"));
        assert_eq!(firsts(&out), vec![Some("Shruti")]);
    }

    #[test]
    fn matches_either_name() {
        let out = filter_contacts(sample(), Some("glenn"));
        assert_eq!(firsts(&out), vec![Some("Glenn")]);
        let out = filter_contacts(sample(), Some("reyes"));
        assert_eq!(firsts(&out), vec![Some("Glenn")]);
    }

    #[test]
    fn subsequence_matches() {
        let out = filter_contacts(sample(), Some("flrnc"));
        assert_eq!(firsts(&out), vec![Some("Ryan")]);
    }

    #[test]
    fn out_of_order_characters_do_not_match() {
        assert!(filter_contacts(sample(), Some("roolf")).is_empty());
    }

    #[test]
    fn nameless_contacts_never_match_a_real_query() {
        let out = filter_contacts(vec![contact(None, None)], Some("a"));
        assert!(out.is_empty());
    }

    #[test]
    fn every_token_must_match_the_same_field() {
        assert!(filter_contacts(sample(), Some("shruti kapoor")).is_empty());
        let out = filter_contacts(sample(), Some("sh ti"));
        assert_eq!(firsts(&out), vec![Some("Shruti")]);
    }

    #[test]
    fn filtering_preserves_order() {
        let out = filter_contacts(sample(), Some("r"));
        assert_eq!(firsts(&out), vec![Some("Shruti"), Some("Glenn"), Some("Ryan")]);
    }
}
