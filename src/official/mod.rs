pub use models::OfficialAccount;
pub use repository::{InMemoryOfficialRepository, OfficialRepository, PostgresOfficialRepository};

pub mod models;
pub mod repository;
