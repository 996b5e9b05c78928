pub mod availability;
pub mod monthly_plan;
pub mod session;
pub mod session_def;
pub mod trainer;

pub use availability::{AvailabilityEntry, AvailabilityStatus};
pub use monthly_plan::MonthlyPlan;
pub use session::{NewSession, Session};
pub use session_def::SessionDef;
pub use trainer::Trainer;

/// Outcome of a month generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationResult {
    /// Sessions were created; carries how many.
    Generated { sessions: usize },
    /// The month already had sessions, nothing was written.
    AlreadyExists,
}
