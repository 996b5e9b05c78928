use serde::Serialize;

/// Publication state for one (year, month).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyPlan {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub is_published: bool,
}

impl MonthlyPlan {
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}
