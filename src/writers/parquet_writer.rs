use crate::error::{ForecastError, Result};
use crate::models::ForecastRecord;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::{Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

const COLUMNS: [&str; 4] = ["location", "min_temp", "max_temp", "description"];

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ForecastError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    pub fn write_records(&self, records: &[ForecastRecord], path: &Path) -> Result<()> {
        self.write_records_batched(records, path, records.len().max(1))
    }

    /// Write records in batches of `batch_size`.
    pub fn write_records_batched(
        &self,
        records: &[ForecastRecord],
        path: &Path,
        batch_size: usize,
    ) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let schema = Self::create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        for chunk in records.chunks(batch_size.max(1)) {
            let batch = Self::records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }
        writer.close()?;

        Ok(())
    }

    fn create_schema() -> Arc<Schema> {
        let fields: Vec<Field> = COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect();
        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(records: &[ForecastRecord], schema: Arc<Schema>) -> Result<RecordBatch> {
        let column = |get: fn(&ForecastRecord) -> &str| -> Arc<dyn Array> {
            Arc::new(StringArray::from_iter_values(records.iter().map(get)))
        };

        let batch = RecordBatch::try_new(
            schema,
            vec![
                column(|r| r.location.as_str()),
                column(|r| r.min_temp.as_str()),
                column(|r| r.max_temp.as_str()),
                column(|r| r.description.as_str()),
            ],
        )?;

        Ok(batch)
    }

    /// Read up to `limit` records back from a file written by this writer.
    pub fn read_sample_records(&self, path: &Path, limit: usize) -> Result<Vec<ForecastRecord>> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut records = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let columns: Vec<&StringArray> = COLUMNS
                .iter()
                .map(|name| {
                    batch
                        .column_by_name(name)
                        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                        .ok_or_else(|| {
                            ForecastError::InvalidFormat(format!(
                                "Missing or non-text column '{}'",
                                name
                            ))
                        })
                })
                .collect::<Result<_>>()?;

            for i in 0..batch.num_rows() {
                if records.len() >= limit {
                    return Ok(records);
                }
                records.push(ForecastRecord::new(
                    columns[0].value(i).to_string(),
                    columns[1].value(i).to_string(),
                    columns[2].value(i).to_string(),
                    columns[3].value(i).to_string(),
                ));
            }
        }

        Ok(records)
    }

    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.1} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_records(count: usize) -> Vec<ForecastRecord> {
        (0..count)
            .map(|i| {
                ForecastRecord::new(
                    format!("Station {}", i),
                    format!("{}", 15 + i % 5),
                    "N/A".to_string(),
                    "多雲".to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_write_empty_records() {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        let result = writer.write_records(&[], temp_file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let records = sample_records(3);

        writer.write_records(&records, temp_file.path())?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 3);
        assert_eq!(writer.read_sample_records(temp_file.path(), 10)?, records);
        assert_eq!(writer.read_sample_records(temp_file.path(), 2)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_batched_write() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(4);
        let temp_file = NamedTempFile::new()?;

        writer.write_records_batched(&sample_records(10), temp_file.path(), 3)?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 10);
        assert!(info.row_groups >= 3);
        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        for compression in ["snappy", "gzip", "lz4", "zstd", "none"] {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new()?;

            let result = writer.write_records(&sample_records(1), temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_compression() {
        assert!(ParquetWriter::new().with_compression("brotli9000").is_err());
    }
}
