use crate::models::StudentRecord;
use std::collections::HashSet;

/// Explicit set of selected roll numbers. Kept alongside the rendered rows
/// instead of being re-derived from widget state.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    rolls: HashSet<String>,
}

impl SelectionSet {
    pub fn toggle(&mut self, roll_no: &str) {
        if !self.rolls.remove(roll_no) {
            self.rolls.insert(roll_no.to_string());
        }
    }

    pub fn select_all<'a>(&mut self, rows: impl IntoIterator<Item = &'a StudentRecord>) {
        for row in rows {
            self.rolls.insert(row.roll_no.clone());
        }
    }

    pub fn clear(&mut self) {
        self.rolls.clear();
    }

    pub fn contains(&self, roll_no: &str) -> bool {
        self.rolls.contains(roll_no)
    }

    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Drop selections that are no longer in the visible row set. Called on
    /// every filter change so a hidden row can never reach a bulk update.
    pub fn retain_visible(&mut self, rows: &[StudentRecord]) {
        self.rolls
            .retain(|roll| rows.iter().any(|row| &row.roll_no == roll));
    }
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

    #[test]
    fn test_select_all_then_clear() {
        let rows = vec![student("A1"), student("B2"), student("C3")];
        let mut selection = SelectionSet::default();

        selection.select_all(&rows);
        assert_eq!(selection.len(), rows.len());

        selection.clear();
        assert_eq!(selection.len(), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut selection = SelectionSet::default();
        selection.toggle("A1");
        assert!(selection.contains("A1"));
        selection.toggle("A1");
        assert!(!selection.contains("A1"));
    }

    #[test]
    fn test_retain_visible_prunes_hidden_rows() {
        let mut selection = SelectionSet::default();
        selection.toggle("A1");
        selection.toggle("B2");

        let visible = vec![student("B2")];
        selection.retain_visible(&visible);

        assert_eq!(selection.len(), 1);
        assert!(selection.contains("B2"));
        assert!(!selection.contains("A1"));
    }
}
