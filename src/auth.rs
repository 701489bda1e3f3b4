use crate::error::{Error, Result};
use crate::user::{User, UserKey};

/// The identity a store operation is performed on behalf of.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserKey,
    pub user: User,
}

impl AuthContext {
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            user,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.user.username
    }

    pub fn require_event_manager(&self) -> Result<()> {
        self.require(self.user.role.can_manage_events(), "manage events")
    }

    pub fn require_registration_reviewer(&self) -> Result<()> {
        self.require(self.user.role.can_review_registrations(), "review registrations")
    }

    pub fn require_user_manager(&self) -> Result<()> {
        self.require(self.user.role.can_manage_users(), "manage users")
    }

    pub fn require_dashboard(&self) -> Result<()> {
        self.require(self.user.role.can_view_dashboard(), "view the dashboard")
    }

    /// Members act for themselves; admins may act for anyone.
    pub fn require_self_or_admin(&self, user_id: &UserKey) -> Result<()> {
        self.require(
            &self.user_id == user_id || self.user.role.is_admin(),
            "act on behalf of another member",
        )
    }

    fn require(&self, allowed: bool, action: &str) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            log::warn!("{} ({}) may not {}", self.user.username, self.user.role, action);
            Err(Error::Unauthorized(format!(
                "{} may not {}",
                self.user.username, action
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;

    #[test]
    fn students_act_only_for_themselves() {
        let ctx = AuthContext::new(User::new("lan", Role::Student));
        assert!(ctx.require_self_or_admin(&ctx.user_id).is_ok());
        assert!(matches!(
            ctx.require_self_or_admin(&UserKey::generate()),
            Err(Error::Unauthorized(_))
        ));
        assert!(ctx.require_event_manager().is_err());
    }

    #[test]
    fn admins_pass_every_check() {
        let ctx = AuthContext::new(User::new("admin", Role::Admin));
        assert!(ctx.require_event_manager().is_ok());
        assert!(ctx.require_registration_reviewer().is_ok());
        assert!(ctx.require_user_manager().is_ok());
        assert!(ctx.require_dashboard().is_ok());
        assert!(ctx.require_self_or_admin(&UserKey::generate()).is_ok());
    }
}
