use crate::club::Club;
use crate::event::EventKey;

// Storage keys, one logical collection each.
pub const EVENTS_KEY: &str = "events";
pub const USERS_KEY: &str = "users";
pub const SESSION_USER_KEY: &str = "session_user";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const ACTIVITY_LOGS_KEY: &str = "activity_logs";
pub const STATS_KEY: &str = "stats";

pub const APP_NAME: &str = "CLB THPT NL3 Portal";

pub const EVENT_FOLDER_ROOT: &str = "data/events";

/// Link target used by notifications to point at an event card.
pub fn event_link(event_id: EventKey) -> String {
    format!("/#event-{}", event_id)
}

/// Where an event's files would live: `data/events/<year>/<club>/<title-slug>`.
/// The year is whatever precedes the first `-` of the date.
pub fn event_folder_path(date: &str, club: Club, title: &str) -> String {
    let year = date.split('-').next().unwrap_or_default();
    format!(
        "{}/{}/{}/{}",
        EVENT_FOLDER_ROOT,
        year,
        club.path_segment(),
        title_slug(title)
    )
}

/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-` and trims dashes from both ends.
pub fn title_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(title_slug("  Hello,   World!! "), "hello-world");
        assert_eq!(title_slug("EVENT: Ra mắt 2025"), "event-ra-m-t-2025");
        assert_eq!(title_slug("!!!"), "");
    }

    #[test]
    fn folder_path_uses_year_club_and_slug() {
        assert_eq!(
            event_folder_path("2023-03-02", Club::English, "English Day"),
            "data/events/2023/CLB_Tiếng_Anh/english-day"
        );
    }

    #[test]
    fn event_link_points_at_card() {
        let id = EventKey::generate();
        assert_eq!(event_link(id), format!("/#event-{}", id));
    }
}
