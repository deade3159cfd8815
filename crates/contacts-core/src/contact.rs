use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ContactId;

/// A contact record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: String,
}

impl Contact {
    /// A new contact with no name, not a favorite, created now.
    pub fn empty() -> Self {
        Self {
            id: ContactId::new(),
            first: None,
            last: None,
            avatar: None,
            twitter: None,
            notes: None,
            favorite: false,
            created_at: timestamp_now(),
        }
    }

    /// Build a contact from seed data, minting a fresh id.
    pub fn from_seed(seed: ContactSeed) -> Self {
        Self {
            first: seed.first,
            last: seed.last,
            avatar: seed.avatar,
            twitter: seed.twitter,
            notes: seed.notes,
            favorite: seed.favorite,
            ..Self::empty()
        }
    }

    /// `"first last"` when either name is set, `None` for a nameless contact.
    ///
    /// Empty strings count as unset.
    pub fn display_name(&self) -> Option<String> {
        let first = non_empty(self.first.as_deref());
        let last = non_empty(self.last.as_deref());
        match (first, last) {
            (None, None) => None,
            (first, last) => Some(format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))),
        }
    }
}

/// Contact data without identity, as found in seed files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSeed {
    pub first: Option<String>,
    pub last: Option<String>,
    pub avatar: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub favorite: bool,
}

/// Current UTC time with fixed-width fractional seconds, so the string
/// form sorts the same way as the instant.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(first: Option<&str>, last: Option<&str>) -> Contact {
        Contact {
            first: first.map(str::to_string),
            last: last.map(str::to_string),
            ..Contact::empty()
        }
    }

    #[test]
    fn empty_contact_is_nameless_and_not_favorite() {
        let c = Contact::empty();
        assert!(c.first.is_none());
        assert!(c.last.is_none());
        assert!(!c.favorite);
        assert!(c.display_name().is_none());
    }

    #[test]
    fn display_name_variants() {
        assert_eq!(named(Some("Ada"), Some("Lovelace")).display_name().unwrap(), "Ada Lovelace");
        assert_eq!(named(Some("Ada"), None).display_name().unwrap(), "Ada ");
        assert_eq!(named(None, Some("Lovelace")).display_name().unwrap(), " Lovelace");
        assert!(named(Some(""), Some("")).display_name().is_none());
    }

    #[test]
    fn timestamps_have_fixed_width() {
        let a = timestamp_now();
        let b = timestamp_now();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'), "got: {a}");
    }

    #[test]
    fn json_uses_camel_case_and_omits_missing_fields() {
        let c = named(Some("Ada"), None);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["first"], "Ada");
        assert!(v.get("last").is_none());
        assert!(v["createdAt"].is_string());
        assert_eq!(v["favorite"], false);
    }

    #[test]
    fn from_seed_mints_id() {
        let seed = ContactSeed {
            first: Some("Grace".into()),
            favorite: true,
            ..ContactSeed::default()
        };
        let c = Contact::from_seed(seed);
        assert!(c.id.as_str().starts_with("ct_"));
        assert_eq!(c.first.as_deref(), Some("Grace"));
        assert!(c.favorite);
    }
}
