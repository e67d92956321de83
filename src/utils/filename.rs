use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Default export path: output/cwa-forecast-{YYMMDD}.{extension}
pub fn generate_default_export_filename(extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year

    let filename = format!(
        "cwa-forecast-{:02}{:02}{:02}.{}",
        year,
        now.month(),
        now.day(),
        extension
    );
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_export_filename() {
        let filename = generate_default_export_filename("csv");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output"));
        assert!(filename_str.ends_with(".csv"));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert!(file_part.starts_with("cwa-forecast-"));
        // "cwa-forecast-" + YYMMDD + ".csv"
        assert_eq!(file_part.len(), "cwa-forecast-".len() + 6 + ".csv".len());
    }

    #[test]
    fn test_parquet_extension() {
        let filename = generate_default_export_filename("parquet");
        assert_eq!(filename.extension().unwrap(), "parquet");
    }
}
