use crate::activity::LogLevel;
use crate::auth::AuthContext;
use crate::club::Club;
use crate::dir;
use crate::error::{Error, Result};
use crate::user::{ProfileUpdate, Role, User, UserKey};
use crate::util;

use super::Store;

impl Store {
    pub fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.db.fetch_or_default(dir::USERS_KEY)?)
    }

    pub fn get_user(&self, id: &UserKey) -> Result<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|u| &u.id == id))
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .list_users()?
            .into_iter()
            .find(|u| u.username == username))
    }

    /// Username if the user is known, otherwise the raw id.
    pub(super) fn display_name_for(&self, id: &UserKey) -> Result<String> {
        Ok(match self.get_user(id)? {
            Some(user) => user.username,
            None => id.to_string(),
        })
    }

    /// `None` signs out. Otherwise `user` becomes the session user and is
    /// written to the user collection: an unknown id is a new member
    /// (counted and logged), a known id is replaced wholesale.
    pub fn save_user(&self, user: Option<User>) -> Result<()> {
        match user {
            Some(user) => {
                self.ensure_username_free(&user)?;
                self.db.insert(dir::SESSION_USER_KEY, &user)?;
                self.upsert_user(&user)
            }
            None => {
                self.db.remove_silent(dir::SESSION_USER_KEY)?;
                Ok(())
            }
        }
    }

    pub fn logout(&self) -> Result<()> {
        self.save_user(None)
    }

    /// Signs in by username. Unknown usernames are registered on the spot:
    /// the configured admin username as an admin, anyone else as a student.
    pub fn login(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if !util::is_username_valid(username) {
            return Err(Error::Validation(format!("invalid username {:?}", username)));
        }

        let user = match self.find_user_by_username(username)? {
            Some(existing) => existing,
            None => {
                let role = if username == self.admin_username {
                    Role::Admin
                } else {
                    Role::Student
                };
                User::new(username, role)
            }
        };

        self.save_user(Some(user.clone()))?;
        Ok(user)
    }

    fn ensure_username_free(&self, user: &User) -> Result<()> {
        match self.find_user_by_username(&user.username)? {
            Some(other) if other.id != user.id => {
                Err(Error::AlreadyExists(format!("username {}", user.username)))
            }
            _ => Ok(()),
        }
    }

    fn upsert_user(&self, user: &User) -> Result<()> {
        let mut users = self.db.write_lock::<Vec<User>>(dir::USERS_KEY)?;
        let is_new = match users.iter().position(|u| u.id == user.id) {
            Some(idx) => {
                users[idx] = user.clone();
                false
            }
            None => {
                users.push(user.clone());
                true
            }
        };
        users.commit()?;

        if is_new {
            self.update_stats(|stats| stats.members += 1)?;
            self.log_activity(
                format!("Thành viên mới gia nhập: {}", user.username),
                &user.username,
                LogLevel::Success,
            )?;
        }
        Ok(())
    }

    /// Applies `f` to the stored user, writes the collection back and
    /// refreshes the session pointer if it is the same user.
    fn modify_user<F>(&self, id: &UserKey, f: F) -> Result<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.db.write_lock::<Vec<User>>(dir::USERS_KEY)?;
        let idx = match users.iter().position(|u| &u.id == id) {
            Some(idx) => idx,
            None => {
                log::warn!("User {} not found", id);
                return Err(Error::not_found("user", id));
            }
        };
        f(&mut users.value_mut()[idx]);
        let user = users[idx].clone();
        users.commit()?;

        self.sync_session(&user)?;
        Ok(user)
    }

    /// Adds points to a user's record. `None` if there is no such user.
    pub(super) fn award_points(&self, id: &UserKey, points: u32) -> Result<Option<User>> {
        match self.modify_user(id, |u| u.points = u.points.saturating_add(points)) {
            Ok(user) => Ok(Some(user)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The user's likes, shares, comments and registrations stay behind.
    /// Admins cannot delete themselves.
    pub fn delete_user(&self, ctx: &AuthContext, id: &UserKey) -> Result<User> {
        ctx.require_user_manager()?;
        if &ctx.user_id == id {
            return Err(Error::Validation("cannot delete yourself".to_owned()));
        }

        let mut users = self.db.write_lock::<Vec<User>>(dir::USERS_KEY)?;
        let removed = match users.iter().position(|u| &u.id == id) {
            Some(idx) => users.remove(idx),
            None => {
                log::warn!("User {} not found", id);
                return Err(Error::not_found("user", id));
            }
        };
        users.commit()?;

        if self.session_user()?.map(|u| u.id) == Some(removed.id) {
            self.db.remove_silent(dir::SESSION_USER_KEY)?;
        }
        self.update_stats(|stats| stats.members = stats.members.saturating_sub(1))?;
        self.log_activity(
            format!("Đã xóa thành viên: {}", removed.username),
            ctx.display_name(),
            LogLevel::Warning,
        )?;
        Ok(removed)
    }

    /// Admins cannot change their own role.
    pub fn update_user_role(&self, ctx: &AuthContext, id: &UserKey, role: Role) -> Result<User> {
        ctx.require_user_manager()?;
        if &ctx.user_id == id {
            return Err(Error::Validation("cannot change your own role".to_owned()));
        }

        let user = self.modify_user(id, |u| u.role = role)?;
        self.log_activity(
            format!("Phân quyền: {} -> {}", user.username, role),
            ctx.display_name(),
            LogLevel::Warning,
        )?;
        Ok(user)
    }

    pub fn update_user_info(
        &self,
        ctx: &AuthContext,
        id: &UserKey,
        update: ProfileUpdate,
    ) -> Result<User> {
        ctx.require_self_or_admin(id)?;

        let user = self.modify_user(id, |u| {
            if let Some(full_name) = update.full_name {
                u.full_name = full_name;
            }
            if let Some(avatar) = update.avatar {
                u.avatar = Some(avatar);
            }
        })?;
        self.log_activity(
            format!("Cập nhật thông tin cá nhân: {}", user.username),
            &user.username,
            LogLevel::Info,
        )?;
        Ok(user)
    }

    /// Follows or unfollows `club` for the caller. Asking on behalf of
    /// anyone else does nothing and returns `None`.
    pub fn toggle_follow_club(
        &self,
        ctx: &AuthContext,
        user_id: &UserKey,
        club: Club,
    ) -> Result<Option<User>> {
        if &ctx.user_id != user_id {
            log::debug!("{} tried to change follows of {}", ctx.user_id, user_id);
            return Ok(None);
        }

        let mut user = match self.get_user(user_id)? {
            Some(user) => user,
            None => {
                log::warn!("User {} not found", user_id);
                return Err(Error::not_found("user", user_id));
            }
        };
        if !user.followed_clubs.remove(&club) {
            user.followed_clubs.insert(club);
        }

        self.upsert_user(&user)?;
        self.sync_session(&user)?;
        Ok(Some(user))
    }
}
