use serde::{Deserialize, Serialize};

// ============================================================================
// Portal API Models
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudentRecord {
    pub roll_no: String,
    pub name: String,
    pub degree: String,
    pub year_of_registration: i32,
    pub marks: f64,
    pub cgpa: f64,
    pub attendance: f64,
    pub grade: String,
    /// Opaque display value computed server-side; only shown on the lookup card.
    #[serde(default)]
    pub remaining_years: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentsResponse {
    pub students: Vec<StudentRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopperResponse {
    pub topper: Option<StudentRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub employee_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarksUpdate {
    pub roll_no: String,
    pub marks: Option<f64>,
    pub cgpa: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub updates: Vec<MarksUpdate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub updated_count: u32,
}

/// Error payload the portal attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// ============================================================================
// Display Models
// ============================================================================

/// Badge class for a letter grade, with `+` mapped to a distinct variant
/// (e.g. "A+" -> "grade-A-plus").
pub fn grade_badge_class(grade: &str) -> String {
    format!("grade-{}", grade.replace('+', "-plus"))
}

#[derive(Debug, Clone)]
pub struct ClassStats {
    pub total_students: usize,
    pub average_cgpa: f64,
}

impl ClassStats {
    pub fn calculate(students: &[StudentRecord]) -> Self {
        let total_students = students.len();

        let average_cgpa = if total_students > 0 {
            let sum: f64 = students.iter().map(|s| s.cgpa).sum();
            sum / total_students as f64
        } else {
            0.0
        };

        Self {
            total_students,
            average_cgpa,
        }
    }

    /// Average CGPA as shown in the stats row: "0.0" for an empty view.
    pub fn average_display(&self) -> String {
        if self.total_students == 0 {
            "0.0".to_string()
        } else {
            format!("{:.2}", self.average_cgpa)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll: &str, cgpa: f64) -> StudentRecord {
        StudentRecord {
            roll_no: roll.to_string(),
            name: "Test Student".to_string(),
            degree: "B.Tech".to_string(),
            year_of_registration: 2024,
            marks: 80.0,
            cgpa,
            attendance: 90.0,
            grade: "A".to_string(),
            remaining_years: None,
        }
    }

    #[test]
    fn test_grade_badge_class() {
        assert_eq!(grade_badge_class("A+"), "grade-A-plus");
        assert_eq!(grade_badge_class("B+"), "grade-B-plus");
        assert_eq!(grade_badge_class("A"), "grade-A");
        assert_eq!(grade_badge_class("F"), "grade-F");
    }

    #[test]
    fn test_stats_average_display() {
        let stats = ClassStats::calculate(&[student("A1", 8.5)]);
        assert_eq!(stats.total_students, 1);
        assert_eq!(stats.average_display(), "8.50");

        let stats = ClassStats::calculate(&[student("A1", 8.5), student("B2", 7.0)]);
        assert_eq!(stats.average_display(), "7.75");

        let empty = ClassStats::calculate(&[]);
        assert_eq!(empty.total_students, 0);
        assert_eq!(empty.average_display(), "0.0");
    }

    #[test]
    fn test_student_record_from_portal_json() {
        let json = r#"{
            "roll_no": "20240101",
            "name": "Rahul Kumar",
            "marks": 85.5,
            "cgpa": 8.5,
            "grade": "A",
            "attendance": 92.0,
            "degree": "B.Tech",
            "year_of_registration": 2024,
            "remaining_years": 2
        }"#;

        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.roll_no, "20240101");
        assert_eq!(record.year_of_registration, 2024);
        assert_eq!(record.remaining_years, Some(2));

        // The list endpoints may omit remaining_years.
        let json = r#"{
            "roll_no": "20230201",
            "name": "Amit Patel",
            "marks": 78.0,
            "cgpa": 7.8,
            "grade": "B+",
            "attendance": 88.0,
            "degree": "B.Sc",
            "year_of_registration": 2023
        }"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.remaining_years, None);
    }
}
