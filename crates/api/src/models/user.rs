//! User domain types.
//!
//! The same shape is used for the database row and the JSON wire format:
//! the `users` table has no columns the API does not expose.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rolodex_core::UserId;

/// A directory user.
///
/// Every field is required; the schema enforces `NOT NULL` on all columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store on insert and immutable after.
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

/// Payload for creating a user. Identical to [`User`] minus the id,
/// which the store assigns.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
}

/// Payload for a partial update: any subset of the five mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}

impl UserPatch {
    /// The supplied (column, value) pairs, in declaration order.
    ///
    /// Column names come from this fixed list, never from request input,
    /// so they are safe to splice into an UPDATE statement.
    #[must_use]
    pub fn assignments(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = &self.name {
            out.push(("name", v.as_str()));
        }
        if let Some(v) = &self.email {
            out.push(("email", v.as_str()));
        }
        if let Some(v) = &self.phone {
            out.push(("phone", v.as_str()));
        }
        if let Some(v) = &self.address {
            out.push(("address", v.as_str()));
        }
        if let Some(v) = &self.country {
            out.push(("country", v.as_str()));
        }
        out
    }

    /// True when no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.country.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_empty() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert!(patch.assignments().is_empty());
    }

    #[test]
    fn test_patch_assignments_subset() {
        let patch: UserPatch =
            serde_json::from_str(r#"{"email":"a@x.com","country":"US"}"#).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(
            patch.assignments(),
            vec![("email", "a@x.com"), ("country", "US")]
        );
    }

    #[test]
    fn test_new_user_requires_all_fields() {
        let result = serde_json::from_str::<NewUser>(r#"{"name":"A","email":"a@x.com"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field"), "unexpected error: {err}");
    }

    #[test]
    fn test_user_serializes_all_six_fields() {
        let user = User {
            user_id: rolodex_core::UserId::new(1),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: "1".to_string(),
            address: "addr".to_string(),
            country: "US".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert_eq!(obj["user_id"], 1);
        assert_eq!(obj["country"], "US");
    }
}
