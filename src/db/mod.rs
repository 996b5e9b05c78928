pub mod availability;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod plans;
pub mod pool;
pub mod sessions;
pub mod stats;
pub mod trainers;
