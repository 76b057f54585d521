use crate::models::{MarksUpdate, StudentRecord};
use crate::selection::SelectionSet;
use indexmap::IndexMap;
use thiserror::Error;

/// Raw pending input for one row, as typed. Both cells start empty; a value
/// participates in the batch only once something parseable was entered.
#[derive(Debug, Clone, Default)]
pub struct PendingEdit {
    pub marks: String,
    pub cgpa: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please select at least one student")]
    NoSelection,

    #[error("Please enter marks or CGPA for selected students")]
    NoValues,
}

fn parse_field(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Build the ordered update batch from the visible rows. Rows must be the
/// currently filtered list so the batch follows render order. Returns a
/// validation error, and issues no request, when nothing usable is selected.
pub fn build_updates(
    rows: &[StudentRecord],
    selection: &SelectionSet,
    pending: &IndexMap<String, PendingEdit>,
) -> Result<Vec<MarksUpdate>, ValidationError> {
    if selection.is_empty() {
        return Err(ValidationError::NoSelection);
    }

    let updates: Vec<MarksUpdate> = rows
        .iter()
        .filter(|row| selection.contains(&row.roll_no))
        .filter_map(|row| {
            let edit = pending.get(&row.roll_no)?;
            let marks = parse_field(&edit.marks);
            let cgpa = parse_field(&edit.cgpa);
            if marks.is_none() && cgpa.is_none() {
                return None;
            }
            Some(MarksUpdate {
                roll_no: row.roll_no.clone(),
                marks,
                cgpa,
            })
        })
        .collect();

    if updates.is_empty() {
        return Err(ValidationError::NoValues);
    }

    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll: &str) -> StudentRecord {
        StudentRecord {
            roll_no: roll.to_string(),
            name: "Test".to_string(),
            degree: "CS".to_string(),
            year_of_registration: 2024,
            marks: 80.0,
            cgpa: 8.0,
            attendance: 90.0,
            grade: "A".to_string(),
            remaining_years: None,
        }
    }

    fn edit(marks: &str, cgpa: &str) -> PendingEdit {
        PendingEdit {
            marks: marks.to_string(),
            cgpa: cgpa.to_string(),
        }
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let rows = vec![student("A1")];
        let mut pending = IndexMap::new();
        pending.insert("A1".to_string(), edit("90", ""));

        let result = build_updates(&rows, &SelectionSet::default(), &pending);
        assert_eq!(result.unwrap_err(), ValidationError::NoSelection);
    }

    #[test]
    fn test_selection_without_values_is_rejected() {
        let rows = vec![student("A1"), student("B2")];
        let mut selection = SelectionSet::default();
        selection.select_all(&rows);

        // No pending entries at all.
        let result = build_updates(&rows, &selection, &IndexMap::new());
        assert_eq!(result.unwrap_err(), ValidationError::NoValues);

        // Entries exist but both cells are blank.
        let mut pending = IndexMap::new();
        pending.insert("A1".to_string(), edit("", ""));
        pending.insert("B2".to_string(), edit("  ", ""));
        let result = build_updates(&rows, &selection, &pending);
        assert_eq!(result.unwrap_err(), ValidationError::NoValues);
    }

    #[test]
    fn test_rows_with_both_cells_empty_are_excluded() {
        let rows = vec![student("A1"), student("B2"), student("C3")];
        let mut selection = SelectionSet::default();
        selection.select_all(&rows);

        let mut pending = IndexMap::new();
        pending.insert("A1".to_string(), edit("92.5", ""));
        pending.insert("B2".to_string(), edit("", ""));
        pending.insert("C3".to_string(), edit("", "9.1"));

        let updates = build_updates(&rows, &selection, &pending).unwrap();
        assert_eq!(
            updates,
            vec![
                MarksUpdate {
                    roll_no: "A1".to_string(),
                    marks: Some(92.5),
                    cgpa: None,
                },
                MarksUpdate {
                    roll_no: "C3".to_string(),
                    marks: None,
                    cgpa: Some(9.1),
                },
            ]
        );
    }

    #[test]
    fn test_batch_follows_row_order() {
        let rows = vec![student("C3"), student("A1"), student("B2")];
        let mut selection = SelectionSet::default();
        selection.select_all(&rows);

        // Insertion order of pending edits differs from row order.
        let mut pending = IndexMap::new();
        pending.insert("B2".to_string(), edit("70", ""));
        pending.insert("C3".to_string(), edit("80", ""));
        pending.insert("A1".to_string(), edit("90", ""));

        let updates = build_updates(&rows, &selection, &pending).unwrap();
        let rolls: Vec<&str> = updates.iter().map(|u| u.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["C3", "A1", "B2"]);
    }

    #[test]
    fn test_unselected_rows_are_ignored() {
        let rows = vec![student("A1"), student("B2")];
        let mut selection = SelectionSet::default();
        selection.toggle("A1");

        let mut pending = IndexMap::new();
        pending.insert("A1".to_string(), edit("90", ""));
        pending.insert("B2".to_string(), edit("55", "5.5"));

        let updates = build_updates(&rows, &selection, &pending).unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].roll_no, "A1");
    }

    #[test]
    fn test_unparseable_input_counts_as_absent() {
        let rows = vec![student("A1")];
        let mut selection = SelectionSet::default();
        selection.toggle("A1");

        let mut pending = IndexMap::new();
        pending.insert("A1".to_string(), edit("9..1", ""));

        let result = build_updates(&rows, &selection, &pending);
        assert_eq!(result.unwrap_err(), ValidationError::NoValues);
    }
}
