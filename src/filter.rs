use crate::models::StudentRecord;

/// Criteria applied conjunctively over the full student list. An absent
/// predicate (None / empty search) matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub course: Option<String>,
    pub year: Option<i32>,
    pub search: String,
}

/// Apply the filter to the full list, preserving relative order. Text search
/// is a case-insensitive substring match against name OR roll number.
pub fn apply_filters(students: &[StudentRecord], criteria: &FilterCriteria) -> Vec<StudentRecord> {
    let search = criteria.search.to_lowercase();

    students
        .iter()
        .filter(|student| {
            let course_match = criteria
                .course
                .as_deref()
                .map(|course| student.degree == course)
                .unwrap_or(true);

            let year_match = criteria
                .year
                .map(|year| student.year_of_registration == year)
                .unwrap_or(true);

            let search_match = search.is_empty()
                || student.name.to_lowercase().contains(&search)
                || student.roll_no.to_lowercase().contains(&search);

            course_match && year_match && search_match
        })
        .cloned()
        .collect()
}

/// Distinct degree values in first-seen order, for cycling the course filter.
pub fn course_options(students: &[StudentRecord]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for student in students {
        if !options.contains(&student.degree) {
            options.push(student.degree.clone());
        }
    }
    options
}

/// Distinct registration years in ascending order, for cycling the year filter.
pub fn year_options(students: &[StudentRecord]) -> Vec<i32> {
    let mut options: Vec<i32> = Vec::new();
    for student in students {
        if !options.contains(&student.year_of_registration) {
            options.push(student.year_of_registration);
        }
    }
    options.sort_unstable();
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll: &str, name: &str, degree: &str, year: i32, cgpa: f64) -> StudentRecord {
        StudentRecord {
            roll_no: roll.to_string(),
            name: name.to_string(),
            degree: degree.to_string(),
            year_of_registration: year,
            marks: 80.0,
            cgpa,
            attendance: 90.0,
            grade: "A".to_string(),
            remaining_years: None,
        }
    }

    fn sample() -> Vec<StudentRecord> {
        vec![
            student("A1", "Asha", "CS", 2022, 8.5),
            student("B2", "Bala", "EE", 2021, 7.0),
            student("C3", "Chitra", "CS", 2021, 9.1),
        ]
    }

    #[test]
    fn test_absent_criteria_match_everything() {
        let all = sample();
        let filtered = apply_filters(&all, &FilterCriteria::default());
        assert_eq!(filtered.len(), all.len());
    }

    #[test]
    fn test_course_filter_scenario() {
        let all = sample();
        let criteria = FilterCriteria {
            course: Some("CS".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&all, &criteria);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].roll_no, "A1");

        let stats = crate::models::ClassStats::calculate(&filtered[..1]);
        assert_eq!(stats.average_display(), "8.50");
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let all = sample();
        let criteria = FilterCriteria {
            course: Some("CS".to_string()),
            year: Some(2021),
            search: String::new(),
        };
        let filtered = apply_filters(&all, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].roll_no, "C3");
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_roll() {
        let all = sample();

        let by_name = apply_filters(
            &all,
            &FilterCriteria {
                search: "ASHA".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].roll_no, "A1");

        let by_roll = apply_filters(
            &all,
            &FilterCriteria {
                search: "b2".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_roll.len(), 1);
        assert_eq!(by_roll[0].name, "Bala");
    }

    #[test]
    fn test_filtered_is_ordered_subset() {
        let all = sample();
        let criteria = FilterCriteria {
            year: Some(2021),
            ..Default::default()
        };
        let filtered = apply_filters(&all, &criteria);

        let rolls: Vec<&str> = filtered.iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["B2", "C3"]);
        for record in &filtered {
            assert!(all.iter().any(|s| s.roll_no == record.roll_no));
        }
    }

    #[test]
    fn test_filter_options() {
        let all = sample();
        assert_eq!(course_options(&all), vec!["CS", "EE"]);
        assert_eq!(year_options(&all), vec![2021, 2022]);
    }
}
