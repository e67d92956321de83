/// Feed payload keys
pub const LOCATION_NAME_KEY: &str = "locationName";
pub const WEATHER_ELEMENT_KEY: &str = "weatherElement";
pub const ELEMENT_NAME_KEY: &str = "elementName";
pub const TIME_KEY: &str = "time";
pub const PARAMETER_KEY: &str = "parameter";
pub const PARAMETER_NAME_KEY: &str = "parameterName";
pub const ELEMENT_VALUE_KEY: &str = "elementValue";
pub const VALUE_KEY: &str = "value";

/// Element names
pub const ELEMENT_WEATHER: &str = "Wx";
pub const ELEMENT_MIN_TEMP: &str = "MinT";
pub const ELEMENT_MAX_TEMP: &str = "MaxT";
pub const ELEMENT_TEMP: &str = "T";

/// Sentinels
pub const MISSING_VALUE: &str = "N/A";
pub const UNKNOWN_LOCATION: &str = "未知";

/// CWA open data endpoint
pub const DEFAULT_API_URL: &str = "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi";
pub const DEFAULT_DATASET_ID: &str = "F-A0010-001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File names
pub const DEFAULT_CACHE_FILE: &str = "F-A0010-001.json";
pub const DEFAULT_DATABASE_FILE: &str = "data.db";
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 3600;
pub const DEFAULT_CONFIG_FILE: &str = "cwa-forecast.toml";

/// Store
pub const WEATHER_TABLE: &str = "weather";

/// Environment
pub const ENV_PREFIX: &str = "CWA";
pub const ENV_API_KEY: &str = "CWA_API_KEY";

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";

/// Export formats
pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_PARQUET: &str = "parquet";
