use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::ForecastRecord;

pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write records with a `location,min_temp,max_temp,description` header.
    pub fn write_records(&self, records: &[ForecastRecord], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(records, file)
    }

    pub fn write_to<W: Write>(&self, records: &[ForecastRecord], sink: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_writer(sink);

        if records.is_empty() {
            writer.write_record(["location", "min_temp", "max_temp", "description"])?;
        }
        for record in records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(writer: &CsvWriter, records: &[ForecastRecord]) -> String {
        let mut buffer = Vec::new();
        writer.write_to(records, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let records = vec![ForecastRecord::new(
            "Taipei".to_string(),
            "18".to_string(),
            "N/A".to_string(),
            "Cloudy, rain later".to_string(),
        )];

        let output = render(&CsvWriter::new(), &records);
        assert_eq!(
            output,
            "location,min_temp,max_temp,description\nTaipei,18,N/A,\"Cloudy, rain later\"\n"
        );
    }

    #[test]
    fn test_empty_batch_still_has_header() {
        let output = render(&CsvWriter::new(), &[]);
        assert_eq!(output, "location,min_temp,max_temp,description\n");
    }

    #[test]
    fn test_tab_delimiter() {
        let records = vec![ForecastRecord::unresolved(Some("Matsu".to_string()))];
        let output = render(&CsvWriter::new().with_delimiter(b'\t'), &records);
        assert!(output.starts_with("location\tmin_temp\tmax_temp\tdescription\n"));
        assert!(output.contains("Matsu\tN/A\tN/A\tN/A"));
    }
}
