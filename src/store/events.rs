use crate::activity::LogLevel;
use crate::auth::AuthContext;
use crate::dir;
use crate::error::{Error, Result};
use crate::event::{
    Comment, EventKey, EventPost, EventStatus, NewEvent, RegistrationForm, RegistrationStatus,
};
use crate::notifications::Notification;
use crate::user::UserKey;

use super::Store;

/// Points a member earns when a registration is approved.
pub const APPROVAL_POINTS: u32 = 20;

impl Store {
    /// Newest first.
    pub fn list_events(&self) -> Result<Vec<EventPost>> {
        Ok(self.db.fetch_or_default(dir::EVENTS_KEY)?)
    }

    pub fn get_event(&self, id: &EventKey) -> Result<Option<EventPost>> {
        Ok(self.list_events()?.into_iter().find(|p| &p.id == id))
    }

    /// Events the user currently holds a registration for, in any status.
    pub fn user_events(&self, user_id: &UserKey) -> Result<Vec<EventPost>> {
        Ok(self
            .list_events()?
            .into_iter()
            .filter(|p| p.is_registered(user_id))
            .collect())
    }

    /// Applies `f` to the stored event and writes the collection back.
    /// Returns the updated event along with whatever `f` returned.
    fn modify_event<F, T>(&self, id: &EventKey, f: F) -> Result<(EventPost, T)>
    where
        F: FnOnce(&mut EventPost) -> Result<T>,
    {
        let mut events = self.db.write_lock::<Vec<EventPost>>(dir::EVENTS_KEY)?;
        let idx = match events.iter().position(|p| &p.id == id) {
            Some(idx) => idx,
            None => {
                log::warn!("Event {} not found", id);
                return Err(Error::not_found("event", id));
            }
        };

        let out = f(&mut events.value_mut()[idx])?;
        let post = events[idx].clone();
        events.commit()?;
        Ok((post, out))
    }

    pub fn create_event(
        &self,
        ctx: &AuthContext,
        new_event: NewEvent,
        author_id: UserKey,
    ) -> Result<EventPost> {
        ctx.require_event_manager()?;

        let post = new_event.into_post(EventKey::generate(), author_id);

        let mut events = self.db.write_lock::<Vec<EventPost>>(dir::EVENTS_KEY)?;
        events.insert(0, post.clone());
        events.commit()?;

        self.update_stats(|stats| stats.events_count += 1)?;

        self.log_activity(
            format!(
                "Đăng sự kiện mới: {} (Lưu tại: {})",
                post.title,
                post.folder_path.as_deref().unwrap_or_default()
            ),
            ctx.display_name(),
            LogLevel::Success,
        )?;

        let followers: Vec<Notification> = self
            .list_users()?
            .iter()
            .filter(|u| u.follows(post.club) && u.id != post.author_id)
            .map(|u| Notification::new_event(u.id, &post))
            .collect();
        log::info!(
            "Notifying {} follower(s) of {} about {}",
            followers.len(),
            post.club,
            post.id
        );
        self.push_notifications(followers)?;

        Ok(post)
    }

    /// Replaces the stored event with the same id wholesale.
    pub fn update_event(&self, ctx: &AuthContext, updated: EventPost) -> Result<EventPost> {
        ctx.require_event_manager()?;
        let id = updated.id;
        let (post, _) = self.modify_event(&id, |p| {
            *p = updated;
            Ok(())
        })?;
        self.log_activity(
            format!("Cập nhật sự kiện: {}", post.title),
            ctx.display_name(),
            LogLevel::Info,
        )?;
        Ok(post)
    }

    /// Notifications and comments pointing at the event are left in place.
    pub fn delete_event(&self, ctx: &AuthContext, id: &EventKey) -> Result<EventPost> {
        ctx.require_event_manager()?;

        let mut events = self.db.write_lock::<Vec<EventPost>>(dir::EVENTS_KEY)?;
        let removed = match events.iter().position(|p| &p.id == id) {
            Some(idx) => events.remove(idx),
            None => {
                log::warn!("Event {} not found", id);
                return Err(Error::not_found("event", id));
            }
        };
        events.commit()?;

        self.update_stats(|stats| stats.events_count = stats.events_count.saturating_sub(1))?;
        self.log_activity(
            format!("Đã xóa sự kiện: {}", removed.title),
            ctx.display_name(),
            LogLevel::Warning,
        )?;
        Ok(removed)
    }

    /// Any status may be set from any other.
    pub fn set_event_status(
        &self,
        ctx: &AuthContext,
        id: &EventKey,
        status: EventStatus,
    ) -> Result<EventPost> {
        ctx.require_event_manager()?;
        let (post, _) = self.modify_event(id, |p| {
            p.status = status;
            Ok(())
        })?;
        self.log_activity(
            format!("Đổi trạng thái sự kiện: {} -> {}", post.title, status),
            ctx.display_name(),
            LogLevel::Info,
        )?;
        Ok(post)
    }

    /// Moves the event one step along open, closed, ended, open.
    pub fn cycle_event_status(&self, ctx: &AuthContext, id: &EventKey) -> Result<EventPost> {
        let current = self
            .get_event(id)?
            .ok_or_else(|| Error::not_found("event", id))?;
        self.set_event_status(ctx, id, current.status.cycled())
    }

    /// Likes are not logged.
    pub fn toggle_like(&self, post_id: &EventKey, user_id: UserKey) -> Result<EventPost> {
        let (post, liked) = self.modify_event(post_id, |p| Ok(p.toggle_like(user_id)))?;
        log::debug!("{} {} event {}", user_id, if liked { "liked" } else { "unliked" }, post_id);
        Ok(post)
    }

    /// A user is recorded once, but every share is logged.
    pub fn record_share(&self, post_id: &EventKey, user_id: UserKey) -> Result<EventPost> {
        let (post, _) = self.modify_event(post_id, |p| Ok(p.record_share(user_id)))?;
        let who = self.display_name_for(&user_id)?;
        self.log_activity(
            format!("Người dùng {} đã chia sẻ sự kiện {}", who, post.title),
            &who,
            LogLevel::Success,
        )?;
        Ok(post)
    }

    pub fn add_comment(&self, post_id: &EventKey, comment: Comment) -> Result<EventPost> {
        let (post, _) = self.modify_event(post_id, |p| {
            p.comments.push(comment);
            Ok(())
        })?;
        Ok(post)
    }

    /// A user holds at most one registration per event; registering again
    /// returns the event unchanged.
    pub fn register_for_event(
        &self,
        ctx: &AuthContext,
        post_id: &EventKey,
        form: RegistrationForm,
    ) -> Result<EventPost> {
        ctx.require_self_or_admin(&form.user_id)?;

        let registrant = form.full_name.clone();
        let user_id = form.user_id;
        let (post, added) =
            self.modify_event(post_id, |p| Ok(p.add_registration(form.into_pending())))?;

        if added {
            self.log_activity(
                format!("Thành viên {} gửi yêu cầu đăng ký {}", registrant, post.title),
                &registrant,
                LogLevel::Info,
            )?;
        } else {
            log::debug!("{} is already registered for {}", user_id, post_id);
        }
        Ok(post)
    }

    /// Drops the user's registration in whatever status it is. Not logged.
    pub fn cancel_registration(
        &self,
        ctx: &AuthContext,
        post_id: &EventKey,
        user_id: &UserKey,
    ) -> Result<EventPost> {
        ctx.require_self_or_admin(user_id)?;
        let (post, removed) = self.modify_event(post_id, |p| Ok(p.remove_registration(user_id)))?;
        if !removed {
            log::debug!("{} had no registration for {}", user_id, post_id);
        }
        Ok(post)
    }

    /// Decides a pending registration. Approval awards [`APPROVAL_POINTS`]
    /// once; asking for the status the registration already has changes
    /// nothing.
    pub fn update_registration_status(
        &self,
        ctx: &AuthContext,
        post_id: &EventKey,
        user_id: &UserKey,
        status: RegistrationStatus,
    ) -> Result<EventPost> {
        ctx.require_registration_reviewer()?;

        let (post, decided) = self.modify_event(post_id, |p| {
            let registration = match p.registrations.iter_mut().find(|r| &r.user_id == user_id) {
                Some(r) => r,
                None => return Err(Error::not_found("registration", user_id)),
            };

            if registration.status == status {
                return Ok(None);
            }
            if !registration.status.can_become(status) {
                return Err(Error::InvalidTransition {
                    from: registration.status,
                    to: status,
                });
            }

            registration.status = status;
            Ok(Some(registration.full_name.clone()))
        })?;

        let registrant = match decided {
            Some(name) => name,
            None => {
                log::debug!("Registration of {} for {} is already {}", user_id, post_id, status);
                return Ok(post);
            }
        };

        match status {
            RegistrationStatus::Approved => {
                if self.award_points(user_id, APPROVAL_POINTS)?.is_none() {
                    log::warn!(
                        "Approved registrant {} has no user record; no points awarded",
                        user_id
                    );
                }
                self.log_activity(
                    format!("Đã duyệt đăng ký cho {} (+{} điểm)", registrant, APPROVAL_POINTS),
                    ctx.display_name(),
                    LogLevel::Success,
                )?;
                let note = Notification::registration_approved(*user_id, &post);
                self.push_notifications(vec![note])?;
            }
            RegistrationStatus::Rejected => {
                self.log_activity(
                    format!("Đã từ chối đăng ký của {}", registrant),
                    ctx.display_name(),
                    LogLevel::Warning,
                )?;
                let note = Notification::registration_rejected(*user_id, &post);
                self.push_notifications(vec![note])?;
            }
            // Nothing moves back to pending; can_become rejects it above.
            RegistrationStatus::Pending => {}
        }

        Ok(post)
    }
}
