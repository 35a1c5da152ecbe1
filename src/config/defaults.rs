//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

/// Timezone queried by the timezone route
pub const DEFAULT_TIMEZONE_ZONE: &str = "Etc/UTC";

/// User-Agent sent to upstream providers (Nominatim rejects requests without one)
pub const DEFAULT_USER_AGENT: &str = concat!("geo-gateway/", env!("CARGO_PKG_VERSION"));

/// Upstream request timeout in seconds (0 disables the timeout)
pub const DEFAULT_TIMEOUT_SECS: u64 = 0;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-gateway";

/// Environment variable overriding the server host
pub const HOST_ENV: &str = "HOST";

/// Environment variable overriding the server port
pub const PORT_ENV: &str = "PORT";
