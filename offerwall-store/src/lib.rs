pub mod app_config;
pub mod association_repo;
pub mod database;
pub mod memory;
pub mod offer_repo;
pub mod wall_repo;

mod error;

pub use database::DbClient;
pub use memory::MemoryStore;
