use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Admin,
}

impl Role {
    /// Indicates whether an account can manage other accounts and activity
    /// capacity overrides.
    pub fn can_administer(self) -> bool {
        self >= Role::Admin
    }
}

impl std::default::Default for Role {
    fn default() -> Self {
        Role::Teacher
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_to_the_closed_lowercase_set() {
        let teacher = bson::to_bson(&Role::Teacher).unwrap();
        let admin = bson::to_bson(&Role::Admin).unwrap();
        assert_eq!(teacher, bson::Bson::String("teacher".into()));
        assert_eq!(admin, bson::Bson::String("admin".into()));

        let parsed: Role = bson::from_bson(bson::Bson::String("admin".into())).unwrap();
        assert_eq!(parsed, Role::Admin);
        assert!(parsed.can_administer());
        assert!(!Role::Teacher.can_administer());
    }
}
