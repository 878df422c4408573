//! Read-only renderings of a record for the details view and list rows.

use crate::model::StudentRecord;

/// Courses joined for display; `-` when there are none
pub fn courses_text(courses: &[String]) -> String {
    if courses.is_empty() {
        "-".to_string()
    } else {
        courses.join(", ")
    }
}

/// Labelled fields shown by the details view, in display order
pub fn detail_lines(record: &StudentRecord) -> Vec<(&'static str, String)> {
    let address = &record.address;
    vec![
        ("Student ID", record.student_id.clone()),
        ("Name", record.name.clone()),
        ("Zipcode", address.zipcode.clone()),
        ("Street", address.street.clone()),
        ("Neighborhood", address.neighborhood.clone()),
        ("City", address.city.clone()),
        ("State", address.state.clone()),
        ("Courses", courses_text(&record.courses)),
    ]
}

pub fn render_details(record: &StudentRecord) -> String {
    detail_lines(record)
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One list row: name, student id and "city - state"
pub fn list_summary(record: &StudentRecord) -> String {
    format!(
        "{} | {} | {} - {}",
        record.name, record.student_id, record.address.city, record.address.state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, RecordId};
    use chrono::Utc;

    fn record(courses: Vec<&str>) -> StudentRecord {
        let now = Utc::now();
        StudentRecord {
            id: RecordId::generate(),
            student_id: "S1".to_string(),
            name: "Ana".to_string(),
            address: Address {
                zipcode: "12345678".to_string(),
                street: "Rua A".to_string(),
                neighborhood: "Centro".to_string(),
                city: "Campinas".to_string(),
                state: "SP".to_string(),
            },
            courses: courses.into_iter().map(String::from).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_courses_text() {
        assert_eq!(courses_text(&[]), "-");
        assert_eq!(
            courses_text(&["Math".to_string(), "Art".to_string()]),
            "Math, Art"
        );
    }

    #[test]
    fn test_render_details() {
        let text = render_details(&record(vec!["Math"]));
        assert!(text.starts_with("Student ID: S1\nName: Ana\n"));
        assert!(text.ends_with("Courses: Math"));
    }

    #[test]
    fn test_list_summary() {
        assert_eq!(list_summary(&record(vec![])), "Ana | S1 | Campinas - SP");
    }
}
