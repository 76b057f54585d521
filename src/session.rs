/// Process-wide faculty session. Set at login, cleared at logout, never
/// expired or re-validated against the server.
#[derive(Debug, Clone, Default)]
pub struct Session {
    faculty_id: Option<String>,
    faculty_name: Option<String>,
}

impl Session {
    pub fn login(&mut self, faculty_id: String, faculty_name: String) {
        self.faculty_id = Some(faculty_id);
        self.faculty_name = Some(faculty_name);
    }

    pub fn logout(&mut self) {
        self.faculty_id = None;
        self.faculty_name = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.faculty_id.is_some()
    }

    pub fn faculty_name(&self) -> &str {
        self.faculty_name.as_deref().unwrap_or("Faculty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.faculty_name(), "Faculty");

        session.login("EMP001".to_string(), "Dr. Rajesh Kumar".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.faculty_name(), "Dr. Rajesh Kumar");

        session.logout();
        assert!(!session.is_authenticated());
    }
}
