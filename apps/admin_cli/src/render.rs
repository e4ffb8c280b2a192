use std::fmt::Write as _;

use shared::domain::{Campus, Student};

pub fn campus_path(campus: &Campus) -> String {
    format!("/campus/{}", campus.id)
}

pub fn student_path(student: &Student) -> String {
    format!("/student/{}", student.id)
}

pub fn campus_list(campuses: &[Campus]) -> String {
    if campuses.is_empty() {
        return "There are no campuses.".to_string();
    }
    let mut out = String::new();
    for campus in campuses {
        let _ = writeln!(
            out,
            "#{} {} | {} | {} student(s)",
            campus.id,
            campus.name,
            campus.address,
            campus.students.len()
        );
    }
    out
}

pub fn campus_detail(campus: &Campus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", campus.name, campus.id);
    let _ = writeln!(out, "Address: {}", campus.address);
    let _ = writeln!(
        out,
        "Description: {}",
        campus
            .description
            .as_deref()
            .unwrap_or("No description provided.")
    );
    if let Some(image_url) = &campus.image_url {
        let _ = writeln!(out, "Image: {image_url}");
    }
    if campus.students.is_empty() {
        let _ = writeln!(out, "No students are enrolled at this campus.");
    } else {
        let _ = writeln!(out, "Students:");
        for student in &campus.students {
            let _ = writeln!(
                out,
                "  #{} {} {}",
                student.id, student.firstname, student.lastname
            );
        }
    }
    out
}

pub fn student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "There are no students.".to_string();
    }
    let mut out = String::new();
    for student in students {
        let campus = student
            .campus
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("no campus");
        let _ = writeln!(
            out,
            "#{} {} | {} | {}",
            student.id,
            student.full_name(),
            or_na(&student.email),
            campus
        );
    }
    out
}

pub fn student_detail(student: &Student) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", student.full_name(), student.id);
    let _ = writeln!(out, "Email: {}", or_na(&student.email));
    match student.gpa {
        Some(gpa) => {
            let _ = writeln!(out, "GPA: {gpa:.2}");
        }
        None => {
            let _ = writeln!(out, "GPA: N/A");
        }
    }
    if let Some(image_url) = &student.image_url {
        let _ = writeln!(out, "Image: {image_url}");
    }
    match (&student.campus, student.campus_id) {
        (Some(campus), _) => {
            let _ = writeln!(out, "Campus: {} (#{})", campus.name, campus.id);
        }
        (None, Some(id)) => {
            let _ = writeln!(out, "Campus: #{id}");
        }
        (None, None) => {
            let _ = writeln!(out, "This student is not enrolled at a campus.");
        }
    }
    out
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}
