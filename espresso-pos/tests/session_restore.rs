//! Session persistence across restarts

mod common;

use common::MockApi;
use espresso_pos::{AdminPage, PosApp, Screen, Session, SessionStore, StaffPage};

fn staff_api() -> MockApi {
    MockApi::new().with_user("asha", "secret", "STAFF")
}

#[tokio::test]
async fn test_login_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut app = PosApp::new(staff_api(), SessionStore::new(dir.path()));
        app.login("asha", "secret").await.unwrap();
    }

    // fresh process: same work dir, new app
    let mut app = PosApp::new(staff_api(), SessionStore::new(dir.path()));
    let session = app.restore().expect("session should survive restart");
    assert_eq!(session.username, "asha");
    assert_eq!(app.screen(None), Screen::Staff(StaffPage::Pos));
}

#[tokio::test]
async fn test_logout_clears_persisted_session() {
    let dir = tempfile::tempdir().unwrap();

    let mut app = PosApp::new(staff_api(), SessionStore::new(dir.path()));
    app.login("asha", "secret").await.unwrap();
    app.logout();

    let mut app = PosApp::new(staff_api(), SessionStore::new(dir.path()));
    assert!(app.restore().is_none());
    assert_eq!(app.screen(None), Screen::Login);
}

#[tokio::test]
async fn test_corrupted_record_restores_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let auth_dir = dir.path().join("auth");
    std::fs::create_dir_all(&auth_dir).unwrap();
    std::fs::write(auth_dir.join("current_session.json"), "%% not json %%").unwrap();

    let mut app = PosApp::new(staff_api(), SessionStore::new(dir.path()));
    assert!(app.restore().is_none());
    assert_eq!(app.screen(Some("pos")), Screen::Login);
}

#[tokio::test]
async fn test_persisted_unknown_role_treated_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    store
        .persist(&Session {
            user_id: 1,
            username: "root".to_string(),
            role: "SUPERUSER".to_string(),
            logged_in_at: 0,
        })
        .unwrap();

    let mut app = PosApp::new(staff_api(), SessionStore::new(dir.path()));
    assert!(app.restore().is_none());
    // the bad record is gone, not resurrected on the next start
    let mut again = PosApp::new(staff_api(), SessionStore::new(dir.path()));
    assert!(again.restore().is_none());
}

#[tokio::test]
async fn test_admin_session_lands_on_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let api = MockApi::new().with_user("boss", "secret", "ADMIN");

    let mut app = PosApp::new(api, SessionStore::new(dir.path()));
    app.login("boss", "secret").await.unwrap();

    assert_eq!(app.screen(None), Screen::Admin(AdminPage::Dashboard));
    // staff-only token must not leak the staff screen to an admin
    assert_eq!(app.screen(Some("pos")), Screen::Admin(AdminPage::Dashboard));
}
