//! Input checking for the add and edit commands.
//!
//! The sync layer sends whatever draft it is given, so everything a user typed
//! is checked here before a request goes out.

use shared::{
    domain::{Campus, CampusId, Student},
    protocol::{CampusDraft, StudentDraft},
};
use thiserror::Error;

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name and address are required.")]
    MissingCampusName,
    #[error("First name and last name are required.")]
    MissingStudentName,
    #[error("Email is required.")]
    MissingEmail,
    #[error("GPA must be a number between 0.0 and 4.0.")]
    InvalidGpa,
    #[error("Campus ID must be a whole number.")]
    InvalidCampusId,
}

/// Raw campus fields as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampusForm {
    pub name: String,
    pub address: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Campus> for CampusForm {
    fn from(campus: &Campus) -> Self {
        Self {
            name: campus.name.clone(),
            address: campus.address.clone(),
            description: campus.description.clone().unwrap_or_default(),
            image_url: campus.image_url.clone().unwrap_or_default(),
        }
    }
}

impl CampusForm {
    pub fn validate(&self) -> Result<CampusDraft, FormError> {
        let name = self.name.trim();
        let address = self.address.trim();
        if name.is_empty() || address.is_empty() {
            return Err(FormError::MissingCampusName);
        }
        Ok(CampusDraft {
            name: name.to_string(),
            address: address.to_string(),
            description: non_empty(&self.description),
            image_url: non_empty(&self.image_url),
        })
    }
}

/// Raw student fields as entered; `gpa` and `campus_id` are still text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gpa: String,
    pub image_url: String,
    pub campus_id: String,
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            firstname: student.firstname.clone(),
            lastname: student.lastname.clone(),
            email: student.email.clone(),
            gpa: student.gpa.map(|gpa| gpa.to_string()).unwrap_or_default(),
            image_url: student.image_url.clone().unwrap_or_default(),
            campus_id: student
                .enrolled_campus()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

impl StudentForm {
    pub fn validate(&self) -> Result<StudentDraft, FormError> {
        let firstname = self.firstname.trim();
        let lastname = self.lastname.trim();
        if firstname.is_empty() || lastname.is_empty() {
            return Err(FormError::MissingStudentName);
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::MissingEmail);
        }

        let gpa = self
            .gpa
            .trim()
            .parse::<f64>()
            .map_err(|_| FormError::InvalidGpa)?;
        if !(MIN_GPA..=MAX_GPA).contains(&gpa) {
            return Err(FormError::InvalidGpa);
        }

        let campus_id = match self.campus_id.trim() {
            "" => None,
            raw => Some(CampusId(
                raw.parse::<i64>().map_err(|_| FormError::InvalidCampusId)?,
            )),
        };

        Ok(StudentDraft {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            email: email.to_string(),
            gpa,
            image_url: non_empty(&self.image_url),
            campus_id,
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
