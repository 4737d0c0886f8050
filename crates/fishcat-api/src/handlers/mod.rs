mod health;
mod projects;
mod samples;
mod unit_types;
mod units;

pub use health::health_check;
pub use projects::list_projects;
pub use samples::list_samples;
pub use unit_types::list_unit_types;
pub use units::list_units;
