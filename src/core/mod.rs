pub mod assignment;
pub mod auth;
pub mod availability;
pub mod generator;
pub mod log;
pub mod template;
pub mod trainer;

pub use assignment::AssignLogic;
pub use availability::AvailabilityLogic;
pub use generator::GenerateLogic;
pub use trainer::TrainerLogic;
