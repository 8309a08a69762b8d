use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use term_desk::prefs::{Preferences, PrefsStore};
use term_desk::session::Session;
use term_desk::viewport::Viewport;

fn viewport() -> Viewport {
    Viewport::new(Rect::new(0, 0, 120, 40))
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn skip_boot_lands_on_login_and_enter_opens_the_desktop() {
    let mut session = Session::new(None, Preferences::default(), true);
    assert_eq!(session.state_name(), "login");
    assert!(!session.handle_event(&press(KeyCode::Enter), viewport()));
    assert_eq!(session.state_name(), "desktop");
}

#[test]
fn preferences_round_trip_through_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = PrefsStore::at(dir.path().join("preferences.json"));
    let mut session = Session::new(
        Some(store.clone()),
        Preferences {
            dark_mode: false,
            brightness: 90,
        },
        true,
    );
    // toggle the theme on the login screen, then flush on the idle tick
    session.handle_event(&press(KeyCode::Char('t')), viewport());
    session.tick();

    let saved = store.load().unwrap();
    assert!(saved.dark_mode);
    assert_eq!(saved.brightness, 90);
}

#[test]
fn ctrl_q_requests_quit() {
    let mut session = Session::new(None, Preferences::default(), true);
    let quit = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(session.handle_event(&quit, viewport()));
}
