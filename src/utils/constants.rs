/// Cell tokens the reader treats as missing values
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Tsunami indicator spellings
pub const TSUNAMI_YES_TOKENS: &[&str] = &["1", "y", "yes", "true", "t"];
pub const TSUNAMI_NO_TOKENS: &[&str] = &["0", "n", "no", "false", "f"];

/// Default role candidates, in priority order
pub const MAGNITUDE_CANDIDATES: &[&str] = &["mag", "magnitude"];
pub const DEPTH_CANDIDATES: &[&str] = &["depth"];
pub const LATITUDE_CANDIDATES: &[&str] = &["lat"];
pub const LONGITUDE_CANDIDATES: &[&str] = &["lon", "long", "longitude"];
pub const TSUNAMI_CANDIDATES: &[&str] = &["tsunami", "is_tsunami", "tsu"];

/// Reader defaults
pub const DEFAULT_DELIMITER: char = ',';

/// Analysis thresholds
pub const STRONG_MAGNITUDE: f64 = 7.0;
pub const SHALLOW_DEPTH_KM: f64 = 50.0;
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Geographic bounds
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// IP geolocation lookup
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "http://ip-api.com/json/";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "QUAKE";

/// Output directory for generated files
pub const OUTPUT_DIR: &str = "output";
