use serde::{Deserialize, Serialize};

use crate::club::Club;
use crate::user::{User, UserKey};

define_uuid_key!(EventKey);
define_uuid_key!(CommentKey);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Open,
    Closed,
    Ended,
}

impl EventStatus {
    /// Next status in the admin "cycle" action: open, closed, ended, open again.
    pub fn cycled(&self) -> EventStatus {
        match self {
            EventStatus::Open => EventStatus::Closed,
            EventStatus::Closed => EventStatus::Ended,
            EventStatus::Ended => EventStatus::Open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Open => "OPEN",
            EventStatus::Closed => "CLOSED",
            EventStatus::Ended => "ENDED",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "PENDING",
            RegistrationStatus::Approved => "APPROVED",
            RegistrationStatus::Rejected => "REJECTED",
        }
    }

    /// Whether an admin decision may move a registration from `self` to `next`.
    /// Only pending registrations are decided; a decision is final until the
    /// registrant cancels.
    pub fn can_become(&self, next: RegistrationStatus) -> bool {
        match (self, next) {
            (RegistrationStatus::Pending, RegistrationStatus::Approved) => true,
            (RegistrationStatus::Pending, RegistrationStatus::Rejected) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentKey,
    pub user_id: UserKey,
    /// Username at the time of posting.
    pub username: String,
    pub content: String,
    pub timestamp: i64,
}

impl Comment {
    pub fn new(author: &User, content: &str) -> Self {
        Self {
            id: CommentKey::generate(),
            user_id: author.id,
            username: author.username.clone(),
            content: content.to_owned(),
            timestamp: crate::util::now_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInfo {
    pub user_id: UserKey,
    pub full_name: String,
    pub grade: String,
    pub class_name: String,
    pub email: String,
    pub timestamp: i64,
    pub status: RegistrationStatus,
}

/// What a member fills in when signing up for an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub user_id: UserKey,
    pub full_name: String,
    pub grade: String,
    pub class_name: String,
    #[serde(default)]
    pub email: String,
}

impl RegistrationForm {
    pub fn into_pending(self) -> RegistrationInfo {
        RegistrationInfo {
            user_id: self.user_id,
            full_name: self.full_name,
            grade: self.grade,
            class_name: self.class_name,
            email: self.email,
            timestamp: crate::util::now_millis(),
            status: RegistrationStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPost {
    pub id: EventKey,
    pub title: String,
    pub club: Club,
    pub description: String,
    pub content: String,
    pub image_url: String,
    pub date: String,
    pub time: String,
    pub duration: Option<String>,
    pub location: String,
    pub author_id: UserKey,
    pub status: EventStatus,
    pub registration_deadline: Option<String>,

    /// In like order, no duplicates.
    pub liked_by: Vec<UserKey>,
    pub shared_by: Vec<UserKey>,
    pub comments: Vec<Comment>,

    /// Always the set of user ids in `registrations`.
    pub registered_user_ids: Vec<UserKey>,
    pub registrations: Vec<RegistrationInfo>,

    pub folder_path: Option<String>,
}

impl EventPost {
    pub fn is_registered(&self, user_id: &UserKey) -> bool {
        self.registered_user_ids.contains(user_id)
    }

    pub fn registration(&self, user_id: &UserKey) -> Option<&RegistrationInfo> {
        self.registrations.iter().find(|r| &r.user_id == user_id)
    }

    pub fn is_liked_by(&self, user_id: &UserKey) -> bool {
        self.liked_by.contains(user_id)
    }

    /// Flips the user's like. Returns true if the post is now liked by them.
    pub fn toggle_like(&mut self, user_id: UserKey) -> bool {
        if self.is_liked_by(&user_id) {
            self.liked_by.retain(|id| id != &user_id);
            false
        } else {
            self.liked_by.push(user_id);
            true
        }
    }

    /// Returns false if the user had already shared the post.
    pub fn record_share(&mut self, user_id: UserKey) -> bool {
        if self.shared_by.contains(&user_id) {
            false
        } else {
            self.shared_by.push(user_id);
            true
        }
    }

    /// Returns false (and changes nothing) if the user is already registered.
    pub fn add_registration(&mut self, info: RegistrationInfo) -> bool {
        if self.is_registered(&info.user_id) {
            return false;
        }
        self.registered_user_ids.push(info.user_id);
        self.registrations.push(info);
        true
    }

    /// Removes the user's registration whatever its status.
    pub fn remove_registration(&mut self, user_id: &UserKey) -> bool {
        let before = self.registrations.len();
        self.registered_user_ids.retain(|id| id != user_id);
        self.registrations.retain(|r| &r.user_id != user_id);
        before != self.registrations.len()
    }

    pub fn registrations_consistent(&self) -> bool {
        let mut ids: Vec<UserKey> = self.registrations.iter().map(|r| r.user_id).collect();
        let mut registered = self.registered_user_ids.clone();
        ids.sort();
        registered.sort();
        let unique = ids.windows(2).all(|w| w[0] != w[1]);
        unique && ids == registered
    }
}

/// Caller-supplied fields for a new event. Interaction collections and the
/// folder path are filled in by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub club: Club,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub location: String,
    pub status: EventStatus,
    #[serde(default)]
    pub registration_deadline: Option<String>,
}

pub const DEFAULT_LOCATION: &str = "Trường THPT NL3";
pub const DEFAULT_CONTENT: &str = "Chưa có nội dung chi tiết";

impl NewEvent {
    pub fn into_post(self, id: EventKey, author_id: UserKey) -> EventPost {
        let folder_path = crate::dir::event_folder_path(&self.date, self.club, &self.title);

        let content = if !self.content.trim().is_empty() {
            self.content
        } else if !self.description.trim().is_empty() {
            self.description.clone()
        } else {
            DEFAULT_CONTENT.to_owned()
        };

        let image_url = if self.image_url.trim().is_empty() {
            crate::util::placeholder_image_url()
        } else {
            self.image_url
        };

        let location = if self.location.trim().is_empty() {
            DEFAULT_LOCATION.to_owned()
        } else {
            self.location
        };

        EventPost {
            id,
            title: self.title,
            club: self.club,
            description: self.description,
            content,
            image_url,
            date: self.date,
            time: self.time,
            duration: self.duration.filter(|d| !d.trim().is_empty()),
            location,
            author_id,
            status: self.status,
            registration_deadline: self.registration_deadline.filter(|d| !d.trim().is_empty()),
            liked_by: Vec::new(),
            shared_by: Vec::new(),
            comments: Vec::new(),
            registered_user_ids: Vec::new(),
            registrations: Vec::new(),
            folder_path: Some(folder_path),
        }
    }
}
