//! The content store: every persisted collection of the portal and every
//! operation that reads or changes them.
//!
//! Each operation is a synchronous read-modify-write of whole collections.
//! Side effects that belong to a mutation (activity log entries,
//! notifications, counters, points) are produced inside the operation, so
//! callers only need to re-read whatever they display.

mod events;
mod notifications;
mod users;

pub use events::APPROVAL_POINTS;

use crate::activity::{self, ActivityLog, LogLevel};
use crate::auth::AuthContext;
use crate::config::Config;
use crate::db::Database;
use crate::dir;
use crate::error::Result;
use crate::event::EventPost;
use crate::seed;
use crate::stats::{self, AppStats, ClubShare};
use crate::user::User;

pub struct Store {
    db: Database,
    admin_username: String,
}

impl Store {
    /// Opens the sled-backed store described by `config`, seeding demo data
    /// into an empty store if asked to.
    pub fn open(config: &Config) -> Result<Self> {
        let store = Self::with_database(Database::open(&config.data_dir)?, &config.admin_username);
        if config.seed_demo_data && store.seed_demo_data()? {
            log::info!("Seeded demo data into {}", config.data_dir);
        }
        Ok(store)
    }

    pub fn in_memory() -> Self {
        Self::with_database(Database::in_memory(), &Config::default().admin_username)
    }

    pub fn with_database(db: Database, admin_username: &str) -> Self {
        Self {
            db,
            admin_username: admin_username.to_owned(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn flush(&self) -> Result<()> {
        Ok(self.db.flush()?)
    }

    // ─── Activity log ────────────────────────────────────────────

    /// Newest first, at most [`activity::MAX_LOG_ENTRIES`].
    pub fn logs(&self) -> Result<Vec<ActivityLog>> {
        Ok(self.db.fetch_or_default(dir::ACTIVITY_LOGS_KEY)?)
    }

    pub fn log_activity(&self, action: String, user: &str, level: LogLevel) -> Result<()> {
        log::info!("[{:?}] {}: {}", level, user, action);
        let mut logs = self.db.write_lock::<Vec<ActivityLog>>(dir::ACTIVITY_LOGS_KEY)?;
        activity::push_capped(logs.value_mut(), ActivityLog::new(action, user, level));
        logs.commit()?;
        Ok(())
    }

    // ─── Stats ───────────────────────────────────────────────────

    pub fn stats(&self) -> Result<AppStats> {
        Ok(self.db.fetch_or_default(dir::STATS_KEY)?)
    }

    /// Counts one page load.
    pub fn increment_visitor(&self) -> Result<AppStats> {
        self.update_stats(|stats| stats.visitors += 1)
    }

    pub fn club_distribution(&self) -> Result<Vec<ClubShare>> {
        Ok(stats::club_distribution(&self.list_events()?))
    }

    fn update_stats<F>(&self, f: F) -> Result<AppStats>
    where
        F: FnOnce(&mut AppStats),
    {
        let mut stats = self.db.write_lock::<AppStats>(dir::STATS_KEY)?;
        f(stats.value_mut());
        let updated = stats.value().clone();
        stats.commit()?;
        Ok(updated)
    }

    // ─── Session ─────────────────────────────────────────────────

    /// The signed-in user, as last written to the session pointer.
    pub fn session_user(&self) -> Result<Option<User>> {
        Ok(self.db.fetch(dir::SESSION_USER_KEY)?)
    }

    /// Context for the session user, built from their stored record. A
    /// pointer to a user that no longer exists gives no context.
    pub fn session_context(&self) -> Result<Option<AuthContext>> {
        match self.session_user()? {
            Some(session) => Ok(self.get_user(&session.id)?.map(AuthContext::new)),
            None => Ok(None),
        }
    }

    /// Rewrites the session pointer if `user` is the signed-in user, so their
    /// latest record is visible without signing in again.
    fn sync_session(&self, user: &User) -> Result<()> {
        match self.session_user()? {
            Some(current) if current.id == user.id => {
                self.db.insert(dir::SESSION_USER_KEY, user)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    // ─── Demo data ───────────────────────────────────────────────

    /// Installs the demo catalogue if nothing has been stored yet. Returns
    /// whether anything was written.
    pub fn seed_demo_data(&self) -> Result<bool> {
        if self.db.contains_key(dir::EVENTS_KEY)? || self.db.contains_key(dir::USERS_KEY)? {
            return Ok(false);
        }

        let users = seed::demo_users(&self.admin_username);
        let author = users
            .iter()
            .find(|u| u.role.is_admin())
            .map(|u| u.id)
            .unwrap_or_else(crate::user::UserKey::generate);
        let posts: Vec<EventPost> = seed::demo_events(author);

        self.db.insert(dir::USERS_KEY, &users)?;
        self.db.insert(dir::EVENTS_KEY, &posts)?;
        self.db.insert(dir::STATS_KEY, &seed::initial_stats(posts.len() as u64))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visitor_counter_increments_per_call() {
        let store = Store::in_memory();
        store.increment_visitor().unwrap();
        let stats = store.increment_visitor().unwrap();
        assert_eq!(stats.visitors, 2);
        assert_eq!(store.stats().unwrap().visitors, 2);
    }

    #[test]
    fn seeding_only_touches_an_empty_store() {
        let store = Store::in_memory();
        assert!(store.seed_demo_data().unwrap());
        let seeded = store.list_events().unwrap().len() as u64;
        assert!(seeded > 0);
        assert_eq!(store.stats().unwrap().events_count, seeded);

        assert!(!store.seed_demo_data().unwrap());
        assert_eq!(store.list_events().unwrap().len() as u64, seeded);
    }

    #[test]
    fn storage_errors_surface_as_db_errors() {
        let store = Store::in_memory();
        store.database().insert(dir::STATS_KEY, &String::from("garbage")).unwrap();
        assert!(matches!(
            store.stats(),
            Err(crate::error::Error::Db(crate::db::Error::DeserializeError(_)))
        ));
    }
}
