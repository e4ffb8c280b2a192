use std::sync::atomic::AtomicUsize;

use super::*;
use crate::fixtures::{campus, student};

#[test]
fn starts_with_empty_slices() {
    let store = Store::new();
    let snapshot = store.snapshot();
    assert_eq!(*snapshot, Snapshot::default());
    assert!(snapshot.campus.is_none());
    assert!(snapshot.all_students.is_empty());
}

#[test]
fn fetched_campus_reads_back_unchanged() {
    let store = Store::new();
    let mut payload = campus(4, "Main");
    payload.image_url = Some("https://img.example/main.png".into());

    store.dispatch(Action::FetchCampus(payload.clone()));

    assert_eq!(store.snapshot().campus.as_ref(), Some(&payload));
}

#[test]
fn fetch_all_then_delete_resets_open_campus() {
    let store = Store::new();
    let main = campus(1, "Main");

    store.dispatch(Action::FetchAllCampuses(vec![main.clone()]));
    store.dispatch(Action::FetchCampus(main));
    let snapshot = store.snapshot();
    assert_eq!(snapshot.all_campuses.len(), 1);
    assert_eq!(snapshot.all_campuses[0].id, CampusId(1));

    store.dispatch(Action::DeleteCampus(CampusId(1)));
    let snapshot = store.snapshot();
    assert!(snapshot.all_campuses.is_empty());
    assert!(snapshot.campus.is_none());
}

#[test]
fn delete_of_other_campus_keeps_open_campus() {
    let store = Store::new();
    store.dispatch(Action::FetchCampus(campus(2, "North")));
    store.dispatch(Action::DeleteCampus(CampusId(1)));
    assert_eq!(store.snapshot().campus_id(), Some(CampusId(2)));
}

#[test]
fn repeated_delete_is_idempotent() {
    let store = Store::new();
    store.dispatch(Action::FetchAllStudents(vec![
        student(6, "F"),
        student(7, "G"),
        student(8, "H"),
    ]));

    let first = store.dispatch(Action::DeleteStudent(StudentId(7)));
    let second = store.dispatch(Action::DeleteStudent(StudentId(7)));
    assert_eq!(first.all_students, second.all_students);
    assert_eq!(second.all_students.len(), 2);
}

#[test]
fn old_snapshots_are_not_mutated_by_dispatch() {
    let store = Store::new();
    store.dispatch(Action::FetchAllCampuses(vec![campus(1, "Main")]));
    let before = store.snapshot();

    store.dispatch(Action::DeleteCampus(CampusId(1)));

    assert_eq!(before.all_campuses.len(), 1);
    assert!(store.snapshot().all_campuses.is_empty());
}

#[test]
fn listeners_run_after_each_dispatch_with_new_snapshot() {
    let store = Store::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = store.subscribe(move |snapshot| {
        sink.lock()
            .expect("lock")
            .push(snapshot.all_campuses.len());
    });

    store.dispatch(Action::FetchAllCampuses(vec![campus(1, "A"), campus(2, "B")]));
    store.dispatch(Action::DeleteCampus(CampusId(1)));
    store.dispatch(Action::FetchStudent(student(1, "Ada")));

    assert_eq!(*seen.lock().expect("lock"), vec![2, 1, 1]);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = Store::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let subscription = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(store.listener_count(), 1);

    store.dispatch(Action::DeleteCampus(CampusId(1)));
    subscription.unsubscribe();
    store.dispatch(Action::DeleteCampus(CampusId(1)));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn listener_may_read_the_store() {
    let store = Store::new();
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let reader = Arc::clone(&store);
    let _subscription = store.subscribe(move |_| {
        *sink.lock().expect("lock") = reader.snapshot().student_id();
    });

    store.dispatch(Action::FetchStudent(student(3, "Cy")));

    assert_eq!(*observed.lock().expect("lock"), Some(StudentId(3)));
}

#[tokio::test]
async fn applied_actions_are_broadcast() {
    let store = Store::new();
    let mut actions = store.subscribe_actions();

    store.dispatch(Action::DeleteStudent(StudentId(9)));

    let received = actions.recv().await.expect("action");
    assert_eq!(received, Action::DeleteStudent(StudentId(9)));
}
