use super::*;
use crate::fixtures::{campus as make_campus, student as make_student};
use shared::domain::{CampusId, StudentId};

fn every_action() -> Vec<Action> {
    vec![
        Action::FetchCampus(make_campus(1, "Main")),
        Action::FetchAllCampuses(vec![make_campus(1, "Main")]),
        Action::AddCampus(make_campus(2, "North")),
        Action::EditCampus(make_campus(1, "Renamed")),
        Action::DeleteCampus(CampusId(1)),
        Action::FetchStudent(make_student(1, "Ada")),
        Action::FetchAllStudents(vec![make_student(1, "Ada")]),
        Action::AddStudent(make_student(2, "Bo")),
        Action::EditStudent(make_student(1, "Ada")),
        Action::DeleteStudent(StudentId(1)),
    ]
}

#[test]
fn student_actions_leave_campus_slices_unchanged() {
    let current = Some(make_campus(1, "Main"));
    let list = vec![make_campus(1, "Main"), make_campus(2, "North")];
    for action in every_action()
        .into_iter()
        .filter(|a| a.kind().contains("STUDENT"))
    {
        assert_eq!(campus(current.clone(), &action), current, "{}", action.kind());
        assert_eq!(all_campuses(list.clone(), &action), list, "{}", action.kind());
    }
}

#[test]
fn campus_actions_leave_student_slices_unchanged() {
    let current = Some(make_student(1, "Ada"));
    let list = vec![make_student(1, "Ada"), make_student(2, "Bo")];
    for action in every_action()
        .into_iter()
        .filter(|a| a.kind().contains("CAMPUS"))
    {
        assert_eq!(student(current.clone(), &action), current, "{}", action.kind());
        assert_eq!(all_students(list.clone(), &action), list, "{}", action.kind());
    }
}

#[test]
fn fetch_replaces_campus_wholesale() {
    let mut payload = make_campus(3, "East");
    payload.description = Some("by the river".into());
    let next = campus(Some(make_campus(1, "Main")), &Action::FetchCampus(payload.clone()));
    assert_eq!(next, Some(payload));
}

#[test]
fn add_loads_the_created_record() {
    let created = make_student(42, "A");
    assert_eq!(
        student(None, &Action::AddStudent(created.clone())),
        Some(created)
    );
}

#[test]
fn edit_replaces_only_the_open_campus() {
    let open = make_campus(5, "Main");
    let same_id = make_campus(5, "Renamed");
    assert_eq!(
        campus(Some(open.clone()), &Action::EditCampus(same_id.clone())),
        Some(same_id)
    );

    let other = make_campus(6, "Other");
    assert_eq!(
        campus(Some(open.clone()), &Action::EditCampus(other)),
        Some(open)
    );
}

#[test]
fn edit_does_not_load_into_an_empty_slice() {
    assert_eq!(campus(None, &Action::EditCampus(make_campus(5, "Main"))), None);
    assert_eq!(student(None, &Action::EditStudent(make_student(5, "Ada"))), None);
}

#[test]
fn delete_resets_only_the_matching_record() {
    let open = make_student(7, "Ada");
    assert_eq!(
        student(Some(open.clone()), &Action::DeleteStudent(StudentId(7))),
        None
    );
    assert_eq!(
        student(Some(open.clone()), &Action::DeleteStudent(StudentId(8))),
        Some(open)
    );
    assert_eq!(campus(None, &Action::DeleteCampus(CampusId(1))), None);
}

#[test]
fn zero_id_record_is_distinct_from_empty() {
    let zero = make_campus(0, "Zero");
    assert_eq!(
        campus(None, &Action::EditCampus(zero.clone())),
        None,
        "empty slice has no id to match"
    );
    assert_eq!(
        campus(Some(zero.clone()), &Action::DeleteCampus(CampusId(0))),
        None
    );
}

#[test]
fn delete_removes_entry_and_preserves_order() {
    let list = vec![make_student(6, "F"), make_student(7, "G"), make_student(8, "H")];
    let next = all_students(list, &Action::DeleteStudent(StudentId(7)));
    let ids: Vec<i64> = next.iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![6, 8]);

    let long: Vec<_> = (1..=50).map(|i| make_campus(i, "C")).collect();
    let next = all_campuses(long, &Action::DeleteCampus(CampusId(25)));
    assert_eq!(next.len(), 49);
    assert!(next.windows(2).all(|w| w[0].id < w[1].id));
    assert!(next.iter().all(|c| c.id != CampusId(25)));
}

#[test]
fn delete_of_absent_entry_is_a_no_op() {
    let list = vec![make_campus(1, "Main")];
    assert_eq!(
        all_campuses(list.clone(), &Action::DeleteCampus(CampusId(99))),
        list
    );
}

#[test]
fn collections_ignore_add_and_edit() {
    let list = vec![make_campus(1, "Main")];
    assert_eq!(
        all_campuses(list.clone(), &Action::AddCampus(make_campus(2, "New"))),
        list
    );
    assert_eq!(
        all_campuses(list.clone(), &Action::EditCampus(make_campus(1, "Renamed"))),
        list
    );
}

#[test]
fn fetch_all_replaces_collection() {
    let next = all_students(
        vec![make_student(1, "Old")],
        &Action::FetchAllStudents(vec![make_student(2, "B"), make_student(3, "C")]),
    );
    let ids: Vec<i64> = next.iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn actions_serialize_with_type_and_payload() {
    let value = serde_json::to_value(Action::DeleteCampus(CampusId(1))).expect("serialize");
    assert_eq!(value, serde_json::json!({ "type": "DELETE_CAMPUS", "payload": 1 }));
}
