use chrono::NaiveTime;

/// One entry of the weekly template: a time window plus its topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDef {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub topic: &'static str,
}

impl SessionDef {
    pub const fn new(start: NaiveTime, end: NaiveTime, topic: &'static str) -> Self {
        Self { start, end, topic }
    }
}
