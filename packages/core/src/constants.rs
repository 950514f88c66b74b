use std::env;
use std::path::PathBuf;

/// Settings key holding the user's dashboard tab order
pub const TAB_ORDER_SETTING: &str = "tabOrder";

/// Default HTTP port for the API server
pub const DEFAULT_PORT: u16 = 4001;

/// Get the path to the Dayboard directory (~/.dayboard)
pub fn dayboard_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".dayboard")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dayboard")
    }
}

/// Get the path to the default database file (~/.dayboard/dayboard.db)
pub fn database_file() -> PathBuf {
    dayboard_dir().join("dayboard.db")
}
