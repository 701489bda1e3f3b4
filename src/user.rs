use std::collections::BTreeSet;

use crate::club::Club;

use serde::{Deserialize, Serialize};

define_uuid_key!(UserKey);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserKey,
    /// Unique; used as the login key.
    pub username: String,
    pub role: Role,
    pub full_name: String,
    pub points: u32,
    pub avatar: Option<String>,
    pub followed_clubs: BTreeSet<Club>,
}

impl User {
    /// A fresh account with the role's starting points and no followed clubs.
    pub fn new(username: &str, role: Role) -> Self {
        Self {
            id: UserKey::generate(),
            username: username.to_owned(),
            role,
            full_name: username.to_owned(),
            points: role.starting_points(),
            avatar: None,
            followed_clubs: BTreeSet::new(),
        }
    }

    pub fn follows(&self, club: Club) -> bool {
        self.followed_clubs.contains(&club)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Student,
    Guest,
}

impl Role {
    pub fn starting_points(&self) -> u32 {
        match self {
            Role::Admin => 9999,
            Role::Student => 150,
            Role::Guest => 0,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_manage_events(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Student => false,
            Role::Guest => false,
        }
    }

    pub fn can_review_registrations(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Student => false,
            Role::Guest => false,
        }
    }

    pub fn can_manage_users(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Student => false,
            Role::Guest => false,
        }
    }

    pub fn can_view_dashboard(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Student => false,
            Role::Guest => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Student => "STUDENT",
            Role::Guest => "GUEST",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a member may change on their own profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_with_role_points() {
        let student = User::new("lan", Role::Student);
        assert_eq!(student.points, 150);
        assert_eq!(student.full_name, "lan");
        assert!(student.followed_clubs.is_empty());

        let admin = User::new("admin", Role::Admin);
        assert_eq!(admin.points, 9999);
    }

    #[test]
    fn only_admins_hold_privileges() {
        for role in [Role::Student, Role::Guest] {
            assert!(!role.can_manage_events());
            assert!(!role.can_manage_users());
            assert!(!role.can_review_registrations());
            assert!(!role.can_view_dashboard());
        }
        assert!(Role::Admin.can_manage_events());
        assert!(Role::Admin.can_manage_users());
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"STUDENT\"");
    }
}
