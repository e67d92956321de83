pub mod csv_writer;
pub mod parquet_writer;
pub mod sqlite_store;

pub use csv_writer::CsvWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
pub use sqlite_store::ForecastStore;
