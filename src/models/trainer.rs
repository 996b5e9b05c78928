use serde::Serialize;

/// A user of the planner. Trainers vote on sessions; admins also plan them.
#[derive(Debug, Clone, Serialize)]
pub struct Trainer {
    pub id: i64,
    pub display_name: String,
    pub is_admin: bool,
    pub created_at: String,
}
