pub mod hash_manager;
pub mod id_generator;

pub use hash_manager::HashManager;
pub use id_generator::IdGenerator;
