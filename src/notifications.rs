use serde::{Deserialize, Serialize};

use crate::dir;
use crate::event::EventPost;
use crate::user::UserKey;

define_uuid_key!(NotificationKey);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Event,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationKey,
    /// Recipient.
    pub user_id: UserKey,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub timestamp: i64,
    pub link: Option<String>,
}

impl Notification {
    fn about_event(
        user_id: UserKey,
        kind: NotificationKind,
        message: String,
        post: &EventPost,
    ) -> Self {
        Self {
            id: NotificationKey::generate(),
            user_id,
            message,
            kind,
            is_read: false,
            timestamp: crate::util::now_millis(),
            link: Some(dir::event_link(post.id)),
        }
    }

    /// Tells a club follower about a newly published event.
    pub fn new_event(user_id: UserKey, post: &EventPost) -> Self {
        let message = format!(
            "{} vừa đăng sự kiện mới: \"{}\"",
            post.club.display_name(),
            post.title
        );
        Self::about_event(user_id, NotificationKind::Event, message, post)
    }

    pub fn registration_approved(user_id: UserKey, post: &EventPost) -> Self {
        let message = format!(
            "🎉 Chúc mừng! Đăng ký tham gia \"{}\" đã được DUYỆT.\n⏰ {} | 📍 {}",
            post.title, post.time, post.location
        );
        Self::about_event(user_id, NotificationKind::System, message, post)
    }

    pub fn registration_rejected(user_id: UserKey, post: &EventPost) -> Self {
        let message = format!(
            "Rất tiếc, đăng ký tham gia sự kiện \"{}\" của bạn đã bị từ chối.",
            post.title
        );
        Self::about_event(user_id, NotificationKind::System, message, post)
    }
}

/// The user's notifications, newest first. Equal timestamps keep the most
/// recently created first.
pub fn for_user(all: &[Notification], user_id: &UserKey) -> Vec<Notification> {
    let mut mine: Vec<Notification> = all
        .iter()
        .rev()
        .filter(|n| &n.user_id == user_id)
        .cloned()
        .collect();
    mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    mine
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(user_id: UserKey, timestamp: i64, message: &str) -> Notification {
        Notification {
            id: NotificationKey::generate(),
            user_id,
            message: message.to_owned(),
            kind: NotificationKind::System,
            is_read: false,
            timestamp,
            link: None,
        }
    }

    #[test]
    fn for_user_filters_and_sorts_newest_first() {
        let me = UserKey::generate();
        let other = UserKey::generate();
        let all = vec![
            note(me, 10, "old"),
            note(other, 50, "not mine"),
            note(me, 30, "newest"),
            note(me, 20, "middle"),
        ];

        let messages: Vec<String> = for_user(&all, &me).into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["newest", "middle", "old"]);
    }

    #[test]
    fn ties_put_later_insertions_first() {
        let me = UserKey::generate();
        let all = vec![note(me, 5, "first"), note(me, 5, "second")];
        let messages: Vec<String> = for_user(&all, &me).into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(note(UserKey::generate(), 1, "x")).unwrap();
        assert_eq!(json["type"], "SYSTEM");
        assert_eq!(json["isRead"], false);
    }
}
