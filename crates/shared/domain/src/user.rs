//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::constants::SEED_USERS;

/// User domain entity
///
/// `login` is the unique key. The JSON form uses camelCase field names
/// (`login`, `firstName`, `lastName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique login
    #[cfg_attr(feature = "openapi", schema(example = "smaldini"))]
    pub login: String,
    /// First name
    #[cfg_attr(feature = "openapi", schema(example = "Stéphane"))]
    pub first_name: String,
    /// Last name
    #[cfg_attr(feature = "openapi", schema(example = "Maldini"))]
    pub last_name: String,
}

impl User {
    /// Create a new user
    pub fn new(
        login: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The fixed set of users inserted at startup
    pub fn seed() -> Vec<User> {
        SEED_USERS
            .iter()
            .map(|(login, first_name, last_name)| User::new(*login, *first_name, *last_name))
            .collect()
    }
}

/// Outcome of a delete statement.
///
/// Delete operations report what the storage did rather than a domain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Number of rows removed
    pub rows_affected: u64,
}

impl DeleteOutcome {
    pub fn new(rows_affected: u64) -> Self {
        Self { rows_affected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_uses_camel_case() {
        let user = User::new("jlong", "Joshua", "Long");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"login": "jlong", "firstName": "Joshua", "lastName": "Long"})
        );
    }

    #[test]
    fn test_user_json_keeps_accents() {
        let user = User::new("smaldini", "Stéphane", "Maldini");
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("Stéphane"));
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back.first_name, "Stéphane");
    }

    #[test]
    fn test_seed_contains_four_named_users() {
        let seed = User::seed();

        assert_eq!(seed.len(), 4);
        assert_eq!(seed[0], User::new("smaldini", "Stéphane", "Maldini"));
        assert_eq!(seed[1], User::new("sdeleuze", "Sébastien", "Deleuze"));
        assert_eq!(seed[2], User::new("jlong", "Joshua", "Long"));
        assert_eq!(seed[3], User::new("bclozel", "Brian", "Clozel"));
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn test_user_schema_carries_examples() {
        use utoipa::ToSchema;

        let (name, schema) = User::schema();
        let json = serde_json::to_value(schema).unwrap();

        assert_eq!(name, "User");
        assert_eq!(json["properties"]["login"]["example"], "smaldini");
        assert_eq!(json["properties"]["lastName"]["example"], "Maldini");
    }

    #[test]
    fn test_delete_outcome_json() {
        let json = serde_json::to_value(DeleteOutcome::new(3)).unwrap();
        assert_eq!(json, serde_json::json!({"rowsAffected": 3}));
    }
}
