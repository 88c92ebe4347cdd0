use serde::{Deserialize, Serialize};

/// Credentials of the signed-in user, handed from screen to screen.
///
/// Travels by value: every screen receives its own copy, deserialized from
/// the navigation bundle, and passes a clone forward when it navigates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    username: String,
    password: String,
}

impl UserContext {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Return a copy with a different username.
    pub fn set_username(self, username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..self
        }
    }

    /// Return a copy with a different password.
    pub fn set_password(self, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..self
        }
    }

    /// Serialized form carried inside a navigation bundle.
    pub fn to_bundle_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_bundle_value(value: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutators_leave_other_field_alone() {
        let user = UserContext::new("ana", "hunter2")
            .set_username("bea")
            .set_password("s3cret");
        assert_eq!(user.username(), "bea");
        assert_eq!(user.password(), "s3cret");
    }

    #[test]
    fn test_bundle_value_reconstructs_equal_copy() {
        let user = UserContext::new("ana", "hunter2");
        let value = user.to_bundle_value().unwrap();
        assert!(value.contains("\"username\":\"ana\""));
        assert_eq!(UserContext::from_bundle_value(&value).unwrap(), user);
    }

    #[test]
    fn test_malformed_bundle_value_is_rejected() {
        assert!(UserContext::from_bundle_value("not json").is_err());
        assert!(UserContext::from_bundle_value("{\"username\":\"ana\"}").is_err());
    }
}
