pub mod config;
pub mod controller;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use config::ServerConfig;
pub use controller::salary::{NewSalaryRecord, SalaryController, SummaryStatistics};
pub use controller::user::{Claims, UserController};
