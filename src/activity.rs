use serde::{Deserialize, Serialize};

define_uuid_key!(LogKey);

/// Only the most recent entries are kept.
pub const MAX_LOG_ENTRIES: usize = 50;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Info,
    Warning,
    Success,
}

/// An entry in the admin activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: LogKey,
    pub action: String,
    /// Display name of whoever performed the action.
    pub user: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub level: LogLevel,
}

impl ActivityLog {
    pub fn new(action: String, user: &str, level: LogLevel) -> Self {
        Self {
            id: LogKey::generate(),
            action,
            user: user.to_owned(),
            timestamp: crate::util::now_millis(),
            level,
        }
    }
}

/// Puts `entry` at the front of a newest-first log and drops whatever falls
/// past the cap.
pub fn push_capped(logs: &mut Vec<ActivityLog>, entry: ActivityLog) {
    logs.insert(0, entry);
    logs.truncate(MAX_LOG_ENTRIES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_capped_newest_first() {
        let mut logs = Vec::new();
        for i in 0..=MAX_LOG_ENTRIES {
            let entry = ActivityLog::new(format!("action {}", i), "tester", LogLevel::Info);
            push_capped(&mut logs, entry);
        }
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].action, format!("action {}", MAX_LOG_ENTRIES));
        // action 0 was the oldest and has been evicted.
        assert!(logs.iter().all(|l| l.action != "action 0"));
        assert_eq!(logs[MAX_LOG_ENTRIES - 1].action, "action 1");
    }
}
