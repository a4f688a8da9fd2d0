//! Read-only directory of known users.
//!
//! The directory is built once at startup and shared by reference for the
//! lifetime of the process. Identities are expected to be unique; lookups
//! return the first match.

use serde::Deserialize;

use super::{User, UserId};

/// Lookup failure for an identity absent from the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("user {id} not found")]
pub struct UserNotFound {
    /// Identity that failed to resolve.
    pub id: UserId,
}

/// Immutable list of users addressable by notifications.
///
/// # Examples
/// ```
/// use notification_producer::domain::{Directory, User, UserId};
///
/// let directory = Directory::new(vec![User::new(7, "Grace")]);
/// assert_eq!(directory.resolve(UserId::new(7)).map(User::name), Ok("Grace"));
/// assert!(directory.resolve(UserId::new(8)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    /// Build a directory from an injected user list.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Resolve an identity to its user record.
    ///
    /// # Errors
    /// Returns [`UserNotFound`] when no record carries `id`.
    pub fn resolve(&self, id: UserId) -> Result<&User, UserNotFound> {
        self.users
            .iter()
            .find(|user| user.id() == id)
            .ok_or(UserNotFound { id })
    }

    /// Number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate users in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(vec![
            User::new(1, "Shreyash"),
            User::new(2, "Rajesh"),
            User::new(3, "Riya"),
            User::new(4, "Sally"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> Directory {
        Directory::default()
    }

    #[rstest]
    #[case(1, "Shreyash")]
    #[case(2, "Rajesh")]
    #[case(3, "Riya")]
    #[case(4, "Sally")]
    fn resolves_built_in_users(directory: Directory, #[case] id: i64, #[case] name: &str) {
        let user = directory.resolve(UserId::new(id)).expect("known user");
        assert_eq!(user.name(), name);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(999)]
    fn unknown_ids_are_not_found(directory: Directory, #[case] id: i64) {
        let err = directory.resolve(UserId::new(id)).expect_err("unknown user");
        assert_eq!(err.id, UserId::new(id));
        assert_eq!(err.to_string(), format!("user {id} not found"));
    }

    #[rstest]
    fn first_match_wins_for_duplicate_ids() {
        let directory = Directory::new(vec![User::new(1, "First"), User::new(1, "Second")]);
        let user = directory.resolve(UserId::new(1)).expect("known user");
        assert_eq!(user.name(), "First");
    }

    #[rstest]
    fn deserialises_from_json_array() {
        let directory: Directory =
            serde_json::from_str(r#"[{"id":10,"name":"Ada"},{"id":11,"name":"Alan"}]"#)
                .expect("directory json");
        assert_eq!(directory.len(), 2);
        let names: Vec<&str> = directory.iter().map(User::name).collect();
        assert_eq!(names, ["Ada", "Alan"]);
    }

    #[rstest]
    fn empty_directory_resolves_nothing() {
        let directory = Directory::new(Vec::new());
        assert!(directory.is_empty());
        assert!(directory.resolve(UserId::new(1)).is_err());
    }
}
