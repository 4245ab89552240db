//! core::person
//!
//! The identity attached to a commit as author or committer.
//!
//! A [`Person`] is a plain value: name, email and a timestamp in seconds
//! since the Unix epoch. Two persons are equal when all three fields are
//! equal. Values are copied across the native boundary; nothing in this
//! crate hands out a borrowed view of libgit2's signature buffers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name, email and timestamp of a commit author or committer.
///
/// # Example
///
/// ```
/// use commitbridge::core::person::Person;
///
/// let p = Person::new("A", "a@x.com", 1000);
/// assert_eq!(p.name(), "A");
/// assert_eq!(p.email(), "a@x.com");
/// assert_eq!(p.time(), 1000);
/// assert_eq!(p.to_string(), "A <a@x.com>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    name: String,
    email: String,
    time: u64,
}

impl Person {
    /// Create a new person value.
    pub fn new(name: impl Into<String>, email: impl Into<String>, time: u64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Seconds since the Unix epoch.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// The timestamp as a UTC datetime.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.time).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_covers_all_fields() {
        let a = Person::new("A", "a@x.com", 1000);
        assert_eq!(a, Person::new("A", "a@x.com", 1000));
        assert_ne!(a, Person::new("B", "a@x.com", 1000));
        assert_ne!(a, Person::new("A", "b@x.com", 1000));
        assert_ne!(a, Person::new("A", "a@x.com", 1001));
    }

    #[test]
    fn datetime_conversion() {
        let p = Person::new("A", "a@x.com", 86_400);
        assert_eq!(p.datetime().unwrap().to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }

    #[test]
    fn datetime_out_of_range() {
        let p = Person::new("A", "a@x.com", u64::MAX);
        assert!(p.datetime().is_none());
    }

    #[test]
    fn serde_shape() {
        let p = Person::new("A", "a@x.com", 1000);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "A", "email": "a@x.com", "time": 1000})
        );
    }
}
