//! Slice reducers.
//!
//! Each reducer takes the current value of its slice and an action and returns
//! the next value. They never fail and never touch the network; actions aimed
//! at other slices hand the current value back untouched.

use shared::domain::{Campus, Student};

use crate::action::Action;

pub fn campus(state: Option<Campus>, action: &Action) -> Option<Campus> {
    match action {
        Action::FetchCampus(payload) | Action::AddCampus(payload) => Some(payload.clone()),
        Action::EditCampus(payload) => match state {
            Some(current) if current.id == payload.id => Some(payload.clone()),
            other => other,
        },
        Action::DeleteCampus(id) => state.filter(|current| current.id != *id),
        _ => state,
    }
}

pub fn student(state: Option<Student>, action: &Action) -> Option<Student> {
    match action {
        Action::FetchStudent(payload) | Action::AddStudent(payload) => Some(payload.clone()),
        Action::EditStudent(payload) => match state {
            Some(current) if current.id == payload.id => Some(payload.clone()),
            other => other,
        },
        Action::DeleteStudent(id) => state.filter(|current| current.id != *id),
        _ => state,
    }
}

pub fn all_campuses(mut state: Vec<Campus>, action: &Action) -> Vec<Campus> {
    match action {
        Action::FetchAllCampuses(payload) => payload.clone(),
        Action::DeleteCampus(id) => {
            state.retain(|campus| campus.id != *id);
            state
        }
        _ => state,
    }
}

pub fn all_students(mut state: Vec<Student>, action: &Action) -> Vec<Student> {
    match action {
        Action::FetchAllStudents(payload) => payload.clone(),
        Action::DeleteStudent(id) => {
            state.retain(|student| student.id != *id);
            state
        }
        _ => state,
    }
}

#[cfg(test)]
#[path = "tests/reducers_tests.rs"]
mod tests;
