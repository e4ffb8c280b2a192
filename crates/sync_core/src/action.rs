use serde::{Deserialize, Serialize};
use shared::domain::{Campus, CampusId, Student, StudentId};

/// Something that happened against the backend, applied to every slice by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    FetchCampus(Campus),
    FetchAllCampuses(Vec<Campus>),
    AddCampus(Campus),
    EditCampus(Campus),
    DeleteCampus(CampusId),
    FetchStudent(Student),
    FetchAllStudents(Vec<Student>),
    AddStudent(Student),
    EditStudent(Student),
    DeleteStudent(StudentId),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::FetchCampus(_) => "FETCH_CAMPUS",
            Action::FetchAllCampuses(_) => "FETCH_ALL_CAMPUSES",
            Action::AddCampus(_) => "ADD_CAMPUS",
            Action::EditCampus(_) => "EDIT_CAMPUS",
            Action::DeleteCampus(_) => "DELETE_CAMPUS",
            Action::FetchStudent(_) => "FETCH_STUDENT",
            Action::FetchAllStudents(_) => "FETCH_ALL_STUDENTS",
            Action::AddStudent(_) => "ADD_STUDENT",
            Action::EditStudent(_) => "EDIT_STUDENT",
            Action::DeleteStudent(_) => "DELETE_STUDENT",
        }
    }
}
