//! Demo catalogue installed into an empty store on request.

use maplit::btreeset;

use crate::club::Club;
use crate::event::{EventKey, EventPost, EventStatus, NewEvent};
use crate::stats::AppStats;
use crate::user::{Role, User, UserKey};

pub fn demo_users(admin_username: &str) -> Vec<User> {
    let mut admin = User::new(admin_username, Role::Admin);
    admin.full_name = "Quản Trị Viên".to_owned();
    admin.avatar = Some("https://picsum.photos/id/2/100/100".to_owned());

    let mut student = User::new("student1", Role::Student);
    student.full_name = "Nguyễn Văn A".to_owned();
    student.avatar = Some("https://picsum.photos/id/64/100/100".to_owned());
    student.followed_clubs = btreeset! { Club::Dtc, Club::English };

    vec![admin, student]
}

#[allow(clippy::too_many_arguments)]
fn demo_event(
    title: &str,
    club: Club,
    description: &str,
    content: &str,
    image_id: u32,
    date: &str,
    time: &str,
    duration: &str,
    location: &str,
    deadline: &str,
    status: EventStatus,
) -> NewEvent {
    NewEvent {
        title: title.to_owned(),
        club,
        description: description.to_owned(),
        content: content.to_owned(),
        image_url: format!("https://picsum.photos/id/{}/800/600", image_id),
        date: date.to_owned(),
        time: time.to_owned(),
        duration: Some(duration.to_owned()),
        location: location.to_owned(),
        status,
        registration_deadline: Some(deadline.to_owned()),
    }
}

/// Newest first, like the live collection.
pub fn demo_events(author: UserKey) -> Vec<EventPost> {
    vec![
        demo_event(
            "Sinh hoạt định kỳ tháng 4",
            Club::Dtc,
            "Sự kiện do câu lạc bộ DTC tổ chức với nhiều hoạt động thú vị về AI và công nghệ mới.",
            "Chi tiết về buổi sinh hoạt...",
            1,
            "2025-04-02",
            "15:00",
            "2 tiếng",
            "Sân trường NL3",
            "2025-04-01",
            EventStatus::Closed,
        ),
        demo_event(
            "EVENT: Ra mắt câu lạc bộ Tiếng Anh",
            Club::English,
            "Sự kiện do câu lạc bộ NEC với hàng loạt hoạt động thú vị được tổ chức...",
            "Chi tiết ra mắt...",
            20,
            "2023-03-02",
            "18:00",
            "3 tiếng",
            "Hội trường A",
            "2023-03-01",
            EventStatus::Ended,
        ),
        demo_event(
            "Học câu lạc bộ NEC",
            Club::English,
            "Buổi học kỹ năng giao tiếp và debate bằng tiếng Anh.",
            "Nội dung buổi học...",
            48,
            "2025-04-02",
            "14:00",
            "4 tiếng",
            "Văn phòng Đoàn",
            "2025-04-01",
            EventStatus::Open,
        ),
        demo_event(
            "Chuyên đề: Văn học hiện đại",
            Club::Literature,
            "Thảo luận về các tác phẩm văn học hiện đại Việt Nam.",
            "Chi tiết...",
            60,
            "2025-04-05",
            "08:00",
            "3 tiếng",
            "Thư viện",
            "2025-04-04",
            EventStatus::Open,
        ),
    ]
    .into_iter()
    .map(|e| e.into_post(EventKey::generate(), author))
    .collect()
}

pub fn initial_stats(events_count: u64) -> AppStats {
    AppStats {
        visitors: 12543,
        members: 1000,
        events_count,
        awards: 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_student_follows_two_clubs() {
        let users = demo_users("admin");
        assert_eq!(users.len(), 2);
        assert!(users[0].role.is_admin());
        assert!(users[1].follows(Club::Dtc) && users[1].follows(Club::English));
    }

    #[test]
    fn demo_events_are_consistent() {
        let author = UserKey::generate();
        let posts = demo_events(author);
        assert_eq!(posts.len(), 4);
        assert!(posts.iter().all(|p| p.author_id == author && p.registrations_consistent()));
        assert!(posts.iter().all(|p| p.folder_path.is_some()));
    }
}
