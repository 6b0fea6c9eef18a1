// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Libris";

/// Application name in lowercase (for paths and log targets)
pub const APP_NAME_LOWER: &str = "libris";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".libris";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "libris.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "LIBRIS_CONFIG";

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "LIBRIS_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "LIBRIS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "LIBRIS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "LIBRIS_LOG";

/// Log filter when neither LIBRIS_LOG nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "info,libris=info";

/// Log filter when debug mode is on and no filter is set
pub const DEBUG_LOG_FILTER: &str = "debug,hyper=info,h2=info";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "LIBRIS_DATA_DIR";

// =============================================================================
// SQLite
// =============================================================================

/// Database file name inside the sqlite data subdirectory
pub const SQLITE_DB_FILENAME: &str = "libris.db";

/// Connection pool size
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// Busy timeout while waiting on a locked database
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// Page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// Pages between automatic WAL checkpoints
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval of the background TRUNCATE checkpoint
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// HTTP
// =============================================================================

/// Maximum request body size
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Header carrying the unpaginated match count on list responses
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Maximum time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
