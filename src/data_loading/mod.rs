pub mod data_loader; // Strategy trait
pub mod csv_data_loader;
pub mod json_data_loader;
pub mod sqlite_data_loader;
pub mod factory;

pub use data_loader::DataLoader;
pub use csv_data_loader::CsvDataLoader;
pub use json_data_loader::JsonDataLoader;
pub use sqlite_data_loader::SqliteDataLoader;
pub use factory::DataLoaderFactory;
