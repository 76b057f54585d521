use crate::models::grade_badge_class;
use crate::session::Session;
use crate::ui::state::{
    AdminFocus, AdminPanel, AppState, LoginField, LoginForm, LookupForm, MessageKind, PortalTab,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(frame: &mut Frame, state: &AppState, session: &Session) {
    match state {
        AppState::Home { tab, lookup, login } => render_home(frame, *tab, lookup, login),
        AppState::LoadingDashboard => render_loading(frame, "Loading student data..."),
        AppState::Admin { panel } => render_admin(frame, panel, session),
    }
}

fn render_loading(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let block = Block::default()
        .title("Student Grading Portal")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Style variant for a grade badge; plus-grades get their own bold variant.
fn grade_style(grade: &str) -> Style {
    let color = match grade.chars().next() {
        Some('A') => Color::Green,
        Some('B') => Color::Cyan,
        Some('C') => Color::Yellow,
        _ => Color::Red,
    };
    let style = Style::default().fg(color);
    if grade_badge_class(grade).ends_with("-plus") {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_home(frame: &mut Frame, tab: PortalTab, lookup: &LookupForm, login: &LoginForm) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    // Title
    let title = Paragraph::new("Student Grading Portal")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Tab bar
    let active = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default();
    let tabs = Paragraph::new(Line::from(vec![
        Span::styled(
            " Check Grades ",
            if tab == PortalTab::Student {
                active
            } else {
                inactive
            },
        ),
        Span::raw(" | "),
        Span::styled(
            " Faculty Login ",
            if tab == PortalTab::Faculty {
                active
            } else {
                inactive
            },
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(tabs, chunks[1]);

    match tab {
        PortalTab::Student => render_lookup_tab(frame, chunks[2], lookup),
        PortalTab::Faculty => render_login_tab(frame, chunks[2], login),
    }

    let help = Paragraph::new(
        "[\u{2190}\u{2192}: Switch Tab | Tab: Switch Field | Enter: Submit | Esc: Quit]",
    )
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn render_lookup_tab(frame: &mut Frame, area: ratatui::layout::Rect, lookup: &LookupForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(7)])
        .split(area);

    let input = Paragraph::new(format!("Roll Number: {}_", lookup.roll_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(input, chunks[0]);

    if let Some(record) = &lookup.result {
        let remaining = record
            .remaining_years
            .map(|y| format!("{} year(s)", y))
            .unwrap_or_else(|| "N/A".to_string());

        let text = vec![
            Line::from(vec![
                Span::styled("Roll No: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(record.roll_no.clone()),
            ]),
            Line::from(vec![
                Span::styled("Name: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(record.name.clone()),
            ]),
            Line::from(vec![
                Span::styled("Degree: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(record.degree.clone()),
            ]),
            Line::from(vec![
                Span::styled("Marks: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{}", record.marks)),
            ]),
            Line::from(vec![
                Span::styled("CGPA: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{}", record.cgpa)),
            ]),
            Line::from(vec![
                Span::styled("Attendance: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{}%", record.attendance)),
            ]),
            Line::from(vec![
                Span::styled(
                    "Year of Registration: ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{}", record.year_of_registration)),
            ]),
            Line::from(vec![
                Span::styled(
                    "Remaining Years: ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(remaining),
            ]),
            Line::from(vec![
                Span::styled("Grade: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(record.grade.clone(), grade_style(&record.grade)),
            ]),
        ];

        let card = Paragraph::new(text).block(
            Block::default()
                .title("Result")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(card, chunks[1]);
    } else if lookup.error {
        let error = Paragraph::new("Student not found! Please check the roll number and try again.")
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[1]);
    } else {
        let hint = Paragraph::new("Enter your roll number and press Enter to view your grades.")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[1]);
    }
}

fn render_login_tab(frame: &mut Frame, area: ratatui::layout::Rect, login: &LoginForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let id_style = if login.focused_field == LoginField::EmployeeId {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let id = Paragraph::new(format!("Employee ID: {}_", login.employee_id)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(id_style),
    );
    frame.render_widget(id, chunks[0]);

    let password_style = if login.focused_field == LoginField::Password {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let masked = "*".repeat(login.password.len());
    let password = Paragraph::new(format!("Password: {}_", masked)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(password_style),
    );
    frame.render_widget(password, chunks[1]);

    if let Some(message) = &login.error {
        let error = Paragraph::new(message.clone())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[2]);
    }
}

fn render_admin(frame: &mut Frame, panel: &AdminPanel, session: &Session) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    // Header
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Student Grading Portal - Admin Panel",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  |  Faculty: {}", session.faculty_name())),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    // Topper and stats summary
    let topper_line = match &panel.topper {
        Some(topper) => Line::from(vec![
            Span::styled("Topper: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "{} ({}) | CGPA: {} | Attendance: {}% | Grade: ",
                topper.name, topper.roll_no, topper.cgpa, topper.attendance
            )),
            Span::styled(topper.grade.clone(), grade_style(&topper.grade)),
        ]),
        None => Line::from(vec![
            Span::styled("Topper: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("N/A"),
        ]),
    };

    let stats = panel.stats();
    let stats_line = Line::from(vec![
        Span::styled(
            "Total Students: ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{}", stats.total_students)),
        Span::raw("  |  "),
        Span::styled("Avg CGPA: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(stats.average_display()),
        Span::raw("  |  "),
        Span::styled("Selected: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("{}", panel.selection.len())),
    ]);

    let summary = Paragraph::new(vec![topper_line, stats_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(summary, chunks[1]);

    // Filter bar
    let search_display = if panel.focus == AdminFocus::Search {
        format!("{}_", panel.filters.search)
    } else {
        panel.filters.search.clone()
    };
    let filter_style = if panel.focus == AdminFocus::Search {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let filters = Paragraph::new(format!(
        "Course: {} | Year: {} | Search: {}",
        panel.filters.course.as_deref().unwrap_or("All"),
        panel
            .filters
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "All".to_string()),
        search_display
    ))
    .block(
        Block::default()
            .title("Filters")
            .borders(Borders::ALL)
            .border_style(filter_style),
    );
    frame.render_widget(filters, chunks[2]);

    // Student table, rebuilt from the filtered view on every draw
    let mut items: Vec<ListItem> = Vec::with_capacity(panel.filtered.len() + 1);
    items.push(
        ListItem::new(format!(
            "      {:<10} {:<18} {:<8} {:>4} {:>7} {:>8} {:>6} {:>7} {:>5}  GRADE",
            "ROLL", "NAME", "DEGREE", "YEAR", "MARKS", "NEW", "CGPA", "NEW", "ATT%"
        ))
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    for (i, student) in panel.filtered.iter().enumerate() {
        let at_cursor = i == panel.cursor;
        let prefix = if at_cursor { "> " } else { "  " };
        let check = if panel.selection.contains(&student.roll_no) {
            "[x]"
        } else {
            "[ ]"
        };

        let edit = panel.pending.get(&student.roll_no);
        let mut new_marks = edit.map(|e| e.marks.clone()).unwrap_or_default();
        let mut new_cgpa = edit.map(|e| e.cgpa.clone()).unwrap_or_default();
        if at_cursor && panel.focus == AdminFocus::Marks {
            new_marks.push('_');
        }
        if at_cursor && panel.focus == AdminFocus::Cgpa {
            new_cgpa.push('_');
        }

        let row = format!(
            "{}{} {:<10.10} {:<18.18} {:<8.8} {:>4} {:>7.1} {:>8.8} {:>6.2} {:>7.7} {:>4.0}%  ",
            prefix,
            check,
            student.roll_no,
            student.name,
            student.degree,
            student.year_of_registration,
            student.marks,
            new_marks,
            student.cgpa,
            new_cgpa,
            student.attendance,
        );

        let style = if at_cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if panel.selection.contains(&student.roll_no) {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(row, style),
            Span::styled(student.grade.clone(), grade_style(&student.grade)),
        ])));
    }

    let list = List::new(items).block(
        Block::default()
            .title(format!("Students ({})", panel.filtered.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, chunks[3]);

    // Footer: message banner when present, otherwise the key help
    if let Some(banner) = &panel.banner {
        let style = match banner.kind {
            MessageKind::Success => Style::default().fg(Color::Green),
            MessageKind::Error => Style::default().fg(Color::Red),
        };
        let message = Paragraph::new(banner.text.clone())
            .style(style.add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .alignment(Alignment::Center);
        frame.render_widget(message, chunks[4]);
    } else {
        let help = match panel.focus {
            AdminFocus::Table => {
                "[\u{2191}\u{2193}: Move | Space: Select | a/n: All/None | m/g: Edit Marks/CGPA | c/y: Filter | /: Search | s: Save | e: Export | r: Reload | l: Logout | q: Quit]"
            }
            AdminFocus::Search => "[Type to search | Enter/Esc: Done]",
            AdminFocus::Marks | AdminFocus::Cgpa => {
                "[0-9 and . to enter a value | Backspace: Clear | Enter/Esc: Done]"
            }
        };
        let help = Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);
    }
}
