use crate::models::StudentRecord;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

/// Export the currently visible student rows to a CSV file.
pub fn export_to_csv(students: &[StudentRecord]) -> Result<PathBuf> {
    if students.is_empty() {
        anyhow::bail!("No students to export");
    }

    // Generate filename with timestamp
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("students_{}.csv", timestamp);
    let filepath = PathBuf::from(&filename);

    let headers = [
        "roll_no",
        "name",
        "degree",
        "year_of_registration",
        "marks",
        "cgpa",
        "attendance",
        "grade",
    ];

    let mut wtr = csv::Writer::from_path(&filepath).context("Failed to create CSV file")?;

    wtr.write_record(headers)
        .context("Failed to write CSV headers")?;

    for student in students {
        let record = [
            student.roll_no.clone(),
            student.name.clone(),
            student.degree.clone(),
            student.year_of_registration.to_string(),
            format!("{}", student.marks),
            format!("{}", student.cgpa),
            format!("{}", student.attendance),
            student.grade.clone(),
        ];

        wtr.write_record(&record)
            .context("Failed to write CSV record")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;

    Ok(filepath)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_csv() {
        let students = vec![StudentRecord {
            roll_no: "20240101".to_string(),
            name: "Rahul Kumar".to_string(),
            degree: "B.Tech".to_string(),
            year_of_registration: 2024,
            marks: 85.5,
            cgpa: 8.5,
            attendance: 92.0,
            grade: "A".to_string(),
            remaining_years: None,
        }];

        let filepath = export_to_csv(&students).unwrap();
        assert!(filepath.exists());

        let contents = std::fs::read_to_string(&filepath).unwrap();
        assert!(contents.starts_with("roll_no,name,degree"));
        assert!(contents.contains("20240101,Rahul Kumar,B.Tech,2024,85.5,8.5,92,A"));

        // Clean up
        std::fs::remove_file(filepath).ok();
    }

    #[test]
    fn test_export_empty_fails() {
        assert!(export_to_csv(&[]).is_err());
    }
}
