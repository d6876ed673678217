pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod salary;
    pub mod user;
}

pub use router::create_router;
pub use types::AppState;
