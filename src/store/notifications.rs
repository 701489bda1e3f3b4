use crate::auth::AuthContext;
use crate::dir;
use crate::error::{Error, Result};
use crate::notifications::{self, Notification, NotificationKey};
use crate::user::UserKey;

use super::Store;

impl Store {
    /// Every notification, in the order they were created.
    pub fn all_notifications(&self) -> Result<Vec<Notification>> {
        Ok(self.db.fetch_or_default(dir::NOTIFICATIONS_KEY)?)
    }

    pub fn notifications_for_user(&self, user_id: &UserKey) -> Result<Vec<Notification>> {
        Ok(notifications::for_user(&self.all_notifications()?, user_id))
    }

    pub fn unread_count(&self, user_id: &UserKey) -> Result<usize> {
        Ok(self
            .all_notifications()?
            .iter()
            .filter(|n| &n.user_id == user_id && !n.is_read)
            .count())
    }

    /// Marks a notification read. Only its recipient (or an admin) may.
    pub fn mark_notification_read(
        &self,
        ctx: &AuthContext,
        id: &NotificationKey,
    ) -> Result<Notification> {
        let mut all = self
            .db
            .write_lock::<Vec<Notification>>(dir::NOTIFICATIONS_KEY)?;
        let idx = match all.iter().position(|n| &n.id == id) {
            Some(idx) => idx,
            None => {
                log::warn!("Notification {} not found", id);
                return Err(Error::not_found("notification", id));
            }
        };
        ctx.require_self_or_admin(&all[idx].user_id)?;

        if !all[idx].is_read {
            all.value_mut()[idx].is_read = true;
        }
        let notification = all[idx].clone();
        all.commit()?;
        Ok(notification)
    }

    pub(super) fn push_notifications(&self, new: Vec<Notification>) -> Result<()> {
        if new.is_empty() {
            return Ok(());
        }
        let mut all = self
            .db
            .write_lock::<Vec<Notification>>(dir::NOTIFICATIONS_KEY)?;
        all.extend(new);
        all.commit()?;
        Ok(())
    }
}
