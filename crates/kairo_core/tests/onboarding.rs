use chrono::{TimeZone, Utc};
use kairo_core::service::onboarding_service::{WELCOME_SENDER, WELCOME_SUBJECT};
use kairo_core::{
    Action, Clock, FixedClock, KeyValueStore, MemoryKvStore, Message, OnboardingError,
    OnboardingForm, OnboardingService, Store,
};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 3, 7, 45, 0).unwrap())
}

fn form(name: &str) -> OnboardingForm {
    OnboardingForm {
        full_name: name.to_string(),
        email: "ada@example.com".to_string(),
        ..OnboardingForm::default()
    }
}

#[test]
fn first_launch_onboarding_writes_marker_name_and_one_welcome_message() {
    let storage = MemoryKvStore::new();
    let mut store = Store::open(&storage, clock().today());
    assert!(store.state().is_first_time_user);

    let id = OnboardingService::new(&mut store, clock())
        .complete(&form("  Ada Lovelace "))
        .unwrap();

    let state = store.state();
    assert!(!state.is_first_time_user);
    assert_eq!(state.settings.user_name, "Ada Lovelace");
    assert_eq!(state.messages.len(), 1);
    let welcome = &state.messages[0];
    assert_eq!(welcome.id, id);
    assert_eq!(welcome.from, WELCOME_SENDER);
    assert_eq!(welcome.subject, WELCOME_SUBJECT);
    assert!(!welcome.read);
    assert_eq!(welcome.date, clock().now());

    assert!(storage.contains_key("firstTimeUser").unwrap());
    let stored: Vec<Message> =
        serde_json::from_str(&storage.get_item("messages").unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);

    let reopened = Store::open(&storage, clock().today());
    assert!(!reopened.state().is_first_time_user);
    assert_eq!(reopened.state().settings.user_name, "Ada Lovelace");
}

#[test]
fn onboarding_runs_once_and_requires_a_name() {
    let mut store = Store::open(MemoryKvStore::new(), clock().today());
    let mut onboarding = OnboardingService::new(&mut store, clock());

    assert_eq!(onboarding.complete(&form("   ")), Err(OnboardingError::EmptyFullName));
    assert!(onboarding.is_pending());

    onboarding.complete(&form("Ada")).unwrap();
    assert_eq!(onboarding.complete(&form("Ada")), Err(OnboardingError::AlreadyOnboarded));
    assert_eq!(store.state().messages.len(), 1);
}

#[test]
fn welcome_message_gets_a_free_id_next_to_a_saturated_one() {
    let mut store = Store::new(MemoryKvStore::new(), clock().today());
    store.dispatch(Action::SetMessages(vec![Message {
        id: i64::MAX,
        from: "Import".to_string(),
        subject: "Old".to_string(),
        body: String::new(),
        date: clock().now(),
        read: true,
    }]));

    let id = OnboardingService::new(&mut store, clock())
        .complete(&form("Ada"))
        .unwrap();
    assert_eq!(id, clock().now().timestamp_millis());
    assert_eq!(store.state().messages.len(), 2);
    assert_eq!(store.state().messages[0].id, id);
}
