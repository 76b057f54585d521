use crate::api::StudentClient;
use crate::error::ApiError;
use crate::models::StudentRecord;
use tracing::{info, warn};

/// Everything the admin panel needs in one snapshot, so the student list and
/// topper can never come from different refresh passes.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub students: Vec<StudentRecord>,
    pub topper: Option<StudentRecord>,
}

/// Fetch the student list and topper together. A topper failure is not fatal;
/// the panel simply shows no topper, as the portal does when none qualifies.
pub async fn load_dashboard(client: &StudentClient) -> Result<Dashboard, ApiError> {
    let (students, topper) = tokio::join!(client.fetch_students(), client.fetch_topper());

    let students = students?;
    info!("loaded {} students", students.len());

    let topper = match topper {
        Ok(topper) => topper,
        Err(e) => {
            warn!("failed to load topper: {}", e);
            None
        }
    };

    Ok(Dashboard { students, topper })
}
