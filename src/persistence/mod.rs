pub mod database;
pub mod files;
pub mod store;

pub use database::{load_database, save_database, Database};
pub use files::{atomic_write, database_file, ensure_data_dir, get_data_dir, init_local_dir, read_file};
pub use store::Store;
