use crate::dashboard::Dashboard;
use crate::filter::{self, FilterCriteria};
use crate::models::{ClassStats, StudentRecord};
use crate::selection::SelectionSet;
use crate::updates::PendingEdit;
use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// How long a message banner stays on screen.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub enum AppState {
    Home {
        tab: PortalTab,
        lookup: LookupForm,
        login: LoginForm,
    },
    LoadingDashboard,
    Admin {
        panel: AdminPanel,
    },
}

impl AppState {
    pub fn home() -> Self {
        AppState::Home {
            tab: PortalTab::Student,
            lookup: LookupForm::default(),
            login: LoginForm::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortalTab {
    Student,
    Faculty,
}

#[derive(Debug, Clone, Default)]
pub struct LookupForm {
    pub roll_input: String,
    pub result: Option<StudentRecord>,
    pub error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoginField {
    #[default]
    EmployeeId,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub employee_id: String,
    pub password: String,
    pub focused_field: LoginField,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdminFocus {
    Table,
    Search,
    Marks,
    Cgpa,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    pub kind: MessageKind,
    shown_at: Instant,
}

impl Banner {
    pub fn new(text: String, kind: MessageKind) -> Self {
        Self {
            text,
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= MESSAGE_TIMEOUT
    }
}

#[derive(Debug, Clone)]
pub struct AdminPanel {
    pub all_students: Vec<StudentRecord>,
    pub filtered: Vec<StudentRecord>,
    pub topper: Option<StudentRecord>,
    pub filters: FilterCriteria,
    pub selection: SelectionSet,
    pub pending: IndexMap<String, PendingEdit>,
    pub cursor: usize,
    pub focus: AdminFocus,
    pub banner: Option<Banner>,
}

impl AdminPanel {
    pub fn new(dashboard: Dashboard) -> Self {
        let filtered = dashboard.students.clone();
        Self {
            all_students: dashboard.students,
            filtered,
            topper: dashboard.topper,
            filters: FilterCriteria::default(),
            selection: SelectionSet::default(),
            pending: IndexMap::new(),
            cursor: 0,
            focus: AdminFocus::Table,
            banner: None,
        }
    }

    /// Swap in a fresh snapshot, keeping filters (and whatever selection and
    /// pending edits still refer to visible rows).
    pub fn refresh(&mut self, dashboard: Dashboard) {
        self.all_students = dashboard.students;
        self.topper = dashboard.topper;
        self.apply_filters();
    }

    /// Recompute the filtered view. Selection and pending edits are pruned to
    /// the rows that remain visible, so a hidden row can never be submitted.
    pub fn apply_filters(&mut self) {
        self.filtered = filter::apply_filters(&self.all_students, &self.filters);
        self.selection.retain_visible(&self.filtered);
        let filtered = &self.filtered;
        self.pending
            .retain(|roll, _| filtered.iter().any(|s| &s.roll_no == roll));
        if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len().saturating_sub(1);
        }
    }

    pub fn stats(&self) -> ClassStats {
        ClassStats::calculate(&self.filtered)
    }

    pub fn cursor_roll(&self) -> Option<String> {
        self.filtered.get(self.cursor).map(|s| s.roll_no.clone())
    }

    pub fn cycle_course(&mut self) {
        let options = filter::course_options(&self.all_students);
        self.filters.course = match &self.filters.course {
            None => options.first().cloned(),
            Some(current) => match options.iter().position(|o| o == current) {
                Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
                _ => None,
            },
        };
        self.apply_filters();
    }

    pub fn cycle_year(&mut self) {
        let options = filter::year_options(&self.all_students);
        self.filters.year = match self.filters.year {
            None => options.first().copied(),
            Some(current) => match options.iter().position(|&o| o == current) {
                Some(i) if i + 1 < options.len() => Some(options[i + 1]),
                _ => None,
            },
        };
        self.apply_filters();
    }

    pub fn show_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.banner = Some(Banner::new(text.into(), kind));
    }

    /// Called once per event-loop pass to expire the banner.
    pub fn tick(&mut self) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired()) {
            self.banner = None;
        }
    }
}
