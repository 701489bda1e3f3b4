use club_portal::auth::AuthContext;
use club_portal::club::Club;
use club_portal::event::{EventStatus, NewEvent};
use club_portal::{Config, Store};

fn config_for(dir: &tempfile::TempDir) -> Config {
    Config {
        data_dir: dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    }
}

#[test]
fn state_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    let (event_id, admin_id) = {
        let store = Store::open(&config).unwrap();
        let admin = AuthContext::new(store.login("admin").unwrap());
        let post = store
            .create_event(
                &admin,
                NewEvent {
                    title: "English Day".to_owned(),
                    club: Club::English,
                    description: String::new(),
                    content: String::new(),
                    image_url: String::new(),
                    date: "2023-03-02".to_owned(),
                    time: "18:00".to_owned(),
                    duration: None,
                    location: String::new(),
                    status: EventStatus::Open,
                    registration_deadline: None,
                },
                admin.user_id,
            )
            .unwrap();
        store.flush().unwrap();
        (post.id, admin.user_id)
    };

    let store = Store::open(&config).unwrap();
    let post = store.get_event(&event_id).unwrap().unwrap();
    assert_eq!(post.title, "English Day");
    assert_eq!(store.session_user().unwrap().map(|u| u.id), Some(admin_id));
    assert_eq!(store.stats().unwrap().events_count, 1);
    assert_eq!(store.stats().unwrap().members, 1);
    assert_eq!(store.logs().unwrap().len(), 2);
}

#[test]
fn seeding_runs_only_on_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        seed_demo_data: true,
        ..config_for(&dir)
    };

    {
        let store = Store::open(&config).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.events_count, store.list_events().unwrap().len() as u64);
        assert_eq!(stats.visitors, 12543);
        let student = store.find_user_by_username("student1").unwrap().unwrap();
        assert!(student.follows(Club::Dtc));
        store.increment_visitor().unwrap();
        store.flush().unwrap();
    }

    let store = Store::open(&config).unwrap();
    assert_eq!(store.stats().unwrap().visitors, 12544);
}
