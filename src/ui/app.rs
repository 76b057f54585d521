use crate::api::{FacultyClient, StudentClient};
use crate::dashboard::{self, Dashboard};
use crate::error::ApiError;
use crate::export;
use crate::session::Session;
use crate::ui::render::render_ui;
use crate::ui::state::{
    AdminFocus, AdminPanel, AppState, LoginField, LoginForm, LookupForm, MessageKind, PortalTab,
};
use crate::updates;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

pub struct App {
    student_client: StudentClient,
    faculty_client: FacultyClient,
    session: Session,
    state: AppState,
}

impl App {
    pub fn new(student_client: StudentClient, faculty_client: FacultyClient) -> Self {
        Self {
            student_client,
            faculty_client,
            session: Session::default(),
            state: AppState::home(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main event loop
        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Always redraw the UI
            terminal.draw(|f| render_ui(f, &self.state, &self.session))?;

            // Check for keyboard events with a short timeout
            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key_event(key).await? {
                        break; // User quit
                    }
                }
            }

            // Expire the message banner
            if let AppState::Admin { panel } = &mut self.state {
                panel.tick();
            }

            // Small yield to allow other async tasks to run
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        Ok(())
    }

    async fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        // Take the state to avoid borrowing issues
        let current_state = std::mem::replace(&mut self.state, AppState::LoadingDashboard);

        match current_state {
            AppState::Home {
                mut tab,
                mut lookup,
                mut login,
            } => {
                match key.code {
                    KeyCode::Esc => return Ok(true), // Quit
                    KeyCode::Left | KeyCode::Right => {
                        // Switch tab and hide any shown errors
                        tab = match tab {
                            PortalTab::Student => PortalTab::Faculty,
                            PortalTab::Faculty => PortalTab::Student,
                        };
                        lookup.error = false;
                        login.error = None;
                        self.state = AppState::Home { tab, lookup, login };
                    }
                    KeyCode::Tab => {
                        if tab == PortalTab::Faculty {
                            login.focused_field = match login.focused_field {
                                LoginField::EmployeeId => LoginField::Password,
                                LoginField::Password => LoginField::EmployeeId,
                            };
                        }
                        self.state = AppState::Home { tab, lookup, login };
                    }
                    KeyCode::Char(c) => {
                        match tab {
                            PortalTab::Student => {
                                if lookup.roll_input.len() < 20 {
                                    lookup.roll_input.push(c);
                                }
                            }
                            PortalTab::Faculty => match login.focused_field {
                                LoginField::EmployeeId => {
                                    if login.employee_id.len() < 20 {
                                        login.employee_id.push(c);
                                    }
                                }
                                LoginField::Password => {
                                    if login.password.len() < 64 {
                                        login.password.push(c);
                                    }
                                }
                            },
                        }
                        self.state = AppState::Home { tab, lookup, login };
                    }
                    KeyCode::Backspace => {
                        match tab {
                            PortalTab::Student => {
                                lookup.roll_input.pop();
                            }
                            PortalTab::Faculty => match login.focused_field {
                                LoginField::EmployeeId => {
                                    login.employee_id.pop();
                                }
                                LoginField::Password => {
                                    login.password.pop();
                                }
                            },
                        }
                        self.state = AppState::Home { tab, lookup, login };
                    }
                    KeyCode::Enter => match tab {
                        PortalTab::Student => {
                            self.submit_lookup(tab, lookup, login).await;
                        }
                        PortalTab::Faculty => {
                            self.submit_login(tab, lookup, login).await;
                        }
                    },
                    _ => {
                        self.state = AppState::Home { tab, lookup, login };
                    }
                }
            }
            AppState::Admin { panel } => match panel.focus {
                AdminFocus::Table => return self.handle_admin_table_key(key, panel).await,
                AdminFocus::Search => self.handle_admin_search_key(key, panel),
                AdminFocus::Marks | AdminFocus::Cgpa => self.handle_admin_edit_key(key, panel),
            },
            state => {
                // Ignore input while loading
                self.state = state;
            }
        }

        Ok(false)
    }

    async fn submit_lookup(
        &mut self,
        tab: PortalTab,
        mut lookup: LookupForm,
        login: LoginForm,
    ) {
        let roll_no = lookup.roll_input.trim().to_string();
        if roll_no.is_empty() {
            self.state = AppState::Home { tab, lookup, login };
            return;
        }

        // Hide previous results before fetching
        lookup.result = None;
        lookup.error = false;

        match self.student_client.fetch_student(&roll_no).await {
            Ok(record) => {
                info!("lookup succeeded for roll {}", roll_no);
                lookup.result = Some(record);
            }
            Err(e) => {
                error!("lookup failed for roll {}: {}", roll_no, e);
                lookup.error = true;
            }
        }

        self.state = AppState::Home { tab, lookup, login };
    }

    async fn submit_login(
        &mut self,
        tab: PortalTab,
        lookup: LookupForm,
        mut login: LoginForm,
    ) {
        let employee_id = login.employee_id.trim().to_string();
        login.error = None;

        info!("attempting faculty login for {}", employee_id);

        match self
            .faculty_client
            .login(&employee_id, &login.password)
            .await
        {
            Ok(response) => {
                info!("login succeeded, entering admin panel");
                self.session.login(employee_id, response.name);
                self.enter_admin().await;
            }
            Err(e) => {
                error!("login failed: {}", e);
                let message = match e.server_message() {
                    Some(text) => text.to_string(),
                    None => match e {
                        ApiError::Network(_) => {
                            "Network error! Please check if the server is running.".to_string()
                        }
                        _ => "Invalid credentials! Please check your Employee ID and password."
                            .to_string(),
                    },
                };
                login.error = Some(message);
                self.state = AppState::Home { tab, lookup, login };
            }
        }
    }

    /// Load the admin panel. Only reachable once the session is written; a
    /// dashboard failure still shows the panel, with an error banner, so the
    /// user can retry with a reload.
    async fn enter_admin(&mut self) {
        if !self.session.is_authenticated() {
            self.state = AppState::home();
            return;
        }

        let mut panel = match dashboard::load_dashboard(&self.student_client).await {
            Ok(dash) => AdminPanel::new(dash),
            Err(e) => {
                error!("failed to load dashboard: {}", e);
                let mut panel = AdminPanel::new(Dashboard {
                    students: Vec::new(),
                    topper: None,
                });
                panel.show_message("Error loading students", MessageKind::Error);
                panel
            }
        };
        panel.focus = AdminFocus::Table;
        self.state = AppState::Admin { panel };
    }

    async fn handle_admin_table_key(
        &mut self,
        key: KeyEvent,
        mut panel: AdminPanel,
    ) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true), // Quit
            KeyCode::Char('l') => {
                // Logout clears the session and navigates back home
                info!("faculty logged out");
                self.session.logout();
                self.state = AppState::home();
                return Ok(false);
            }
            KeyCode::Up => {
                if panel.cursor > 0 {
                    panel.cursor -= 1;
                }
            }
            KeyCode::Down => {
                if panel.cursor < panel.filtered.len().saturating_sub(1) {
                    panel.cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(roll) = panel.cursor_roll() {
                    panel.selection.toggle(&roll);
                }
            }
            KeyCode::Char('a') => {
                let rows = panel.filtered.clone();
                panel.selection.select_all(&rows);
            }
            KeyCode::Char('n') => {
                panel.selection.clear();
            }
            KeyCode::Char('/') => {
                panel.focus = AdminFocus::Search;
            }
            KeyCode::Char('m') => {
                if !panel.filtered.is_empty() {
                    panel.focus = AdminFocus::Marks;
                }
            }
            KeyCode::Char('g') => {
                if !panel.filtered.is_empty() {
                    panel.focus = AdminFocus::Cgpa;
                }
            }
            KeyCode::Char('c') => {
                panel.cycle_course();
            }
            KeyCode::Char('y') => {
                panel.cycle_year();
            }
            KeyCode::Char('s') => {
                panel = self.save_marks(panel).await;
            }
            KeyCode::Char('e') => {
                match export::export_to_csv(&panel.filtered) {
                    Ok(path) => {
                        info!("exported {} students to {}", panel.filtered.len(), path.display());
                        panel.show_message(
                            format!("Exported to {}", path.display()),
                            MessageKind::Success,
                        );
                    }
                    Err(e) => {
                        error!("export failed: {}", e);
                        panel.show_message(e.to_string(), MessageKind::Error);
                    }
                }
            }
            KeyCode::Char('r') => {
                panel = self.reload_dashboard(panel).await;
            }
            _ => {}
        }

        self.state = AppState::Admin { panel };
        Ok(false)
    }

    fn handle_admin_search_key(&mut self, key: KeyEvent, mut panel: AdminPanel) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                panel.focus = AdminFocus::Table;
            }
            KeyCode::Char(c) => {
                if panel.filters.search.len() < 30 {
                    panel.filters.search.push(c);
                    // Recomputed on every keystroke, no debouncing
                    panel.apply_filters();
                }
            }
            KeyCode::Backspace => {
                panel.filters.search.pop();
                panel.apply_filters();
            }
            _ => {}
        }

        self.state = AppState::Admin { panel };
    }

    fn handle_admin_edit_key(&mut self, key: KeyEvent, mut panel: AdminPanel) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                panel.focus = AdminFocus::Table;
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                let focus = panel.focus;
                if let Some(roll) = panel.cursor_roll() {
                    let edit = panel.pending.entry(roll).or_default();
                    match focus {
                        AdminFocus::Marks => {
                            if edit.marks.len() < 6 {
                                edit.marks.push(c);
                            }
                        }
                        AdminFocus::Cgpa => {
                            if edit.cgpa.len() < 5 {
                                edit.cgpa.push(c);
                            }
                        }
                        _ => {}
                    }
                }
            }
            KeyCode::Backspace => {
                let focus = panel.focus;
                if let Some(roll) = panel.cursor_roll() {
                    if let Some(edit) = panel.pending.get_mut(&roll) {
                        match focus {
                            AdminFocus::Marks => {
                                edit.marks.pop();
                            }
                            AdminFocus::Cgpa => {
                                edit.cgpa.pop();
                            }
                            _ => {}
                        }
                    }
                }
            }
            _ => {}
        }

        self.state = AppState::Admin { panel };
    }

    /// Bulk update flow: validate, post the batch, then refresh both the
    /// table and the topper from one coordinated fetch.
    async fn save_marks(
        &mut self,
        mut panel: AdminPanel,
    ) -> AdminPanel {
        let updates = match updates::build_updates(&panel.filtered, &panel.selection, &panel.pending)
        {
            Ok(updates) => updates,
            Err(validation) => {
                panel.show_message(validation.to_string(), MessageKind::Error);
                return panel;
            }
        };

        info!("submitting {} marks update(s)", updates.len());

        match self.faculty_client.submit_updates(updates).await {
            Ok(response) => {
                panel.show_message(
                    format!("Successfully updated {} student(s)", response.updated_count),
                    MessageKind::Success,
                );
                panel = self.reload_dashboard(panel).await;
                panel.selection.clear();
                panel.pending.clear();
            }
            Err(e) => {
                error!("marks update failed: {}", e);
                panel.show_message("Error updating marks", MessageKind::Error);
            }
        }

        panel
    }

    async fn reload_dashboard(
        &mut self,
        mut panel: AdminPanel,
    ) -> AdminPanel {
        match dashboard::load_dashboard(&self.student_client).await {
            Ok(dash) => {
                panel.refresh(dash);
            }
            Err(e) => {
                error!("failed to reload students: {}", e);
                panel.show_message("Error loading students", MessageKind::Error);
            }
        }
        panel
    }
}
