use serde::{Deserialize, Serialize};

use crate::domain::{Campus, CampusId};

/// Body of a campus create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusDraft {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Campus> for CampusDraft {
    fn from(campus: &Campus) -> Self {
        Self {
            name: campus.name.clone(),
            address: campus.address.clone(),
            description: campus.description.clone(),
            image_url: campus.image_url.clone(),
        }
    }
}

/// Body of a student create or update request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gpa: f64,
    pub image_url: Option<String>,
    pub campus_id: Option<CampusId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campus_draft_copies_editable_fields() {
        let campus = Campus {
            id: CampusId(1),
            name: "Main".into(),
            address: "1 St".into(),
            description: Some("flagship".into()),
            image_url: None,
            students: Vec::new(),
        };
        let draft = CampusDraft::from(&campus);
        assert_eq!(draft.name, "Main");
        assert_eq!(draft.description.as_deref(), Some("flagship"));
    }

    #[test]
    fn student_draft_serializes_null_campus() {
        let draft = StudentDraft {
            firstname: "A".into(),
            lastname: "B".into(),
            email: "a@b.com".into(),
            gpa: 3.5,
            image_url: None,
            campus_id: None,
        };
        let value = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "firstname": "A",
                "lastname": "B",
                "email": "a@b.com",
                "gpa": 3.5,
                "imageUrl": null,
                "campusId": null,
            })
        );
    }
}
