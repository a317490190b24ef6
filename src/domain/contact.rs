use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A newly registered user as handed to the marketing channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContact {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub signup_date: DateTime<Utc>,
    pub tags: BTreeSet<String>,
}

impl MarketingContact {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: role.into(),
            phone: None,
            signup_date: Utc::now(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        let phone = phone.into();
        self.phone = (!phone.trim().is_empty()).then_some(phone);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_signup_date(mut self, signup_date: DateTime<Utc>) -> Self {
        self.signup_date = signup_date;
        self
    }

    pub fn has_phone(&self) -> bool {
        self.phone.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_phone_counts_as_missing() {
        let contact = MarketingContact::new("a@b.io", "Ada", "Lovelace", "student").with_phone("  ");
        assert!(!contact.has_phone());

        let contact = contact.with_phone("+15550100");
        assert!(contact.has_phone());
    }

    #[test]
    fn test_serializes_camel_case() {
        let contact = MarketingContact::new("a@b.io", "Ada", "Lovelace", "student")
            .with_tag("new-signup");
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("phone").is_none());
        assert_eq!(json["tags"][0], "new-signup");
    }
}
