//! Centralized path management for the contact-sync CLI
//!
//! Default locations of the database, the export directory and the
//! configuration file.

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DATA_DIR: &str = "contact-sync";

/// The name of the export subdirectory
const EXPORT_SUBDIR: &str = "export";

/// The name of the database file
const DATABASE_FILE: &str = "contact-sync.db";

/// Returns the base data directory for the application
///
/// On Unix-like systems this is `~/.local/share/contact-sync`, on Windows
/// `%APPDATA%/contact-sync`. Falls back to `.contact-sync` in the current
/// directory when neither can be determined.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(".contact-sync"))
}

/// Returns the default path of the SQLite database
pub fn get_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}

/// Returns the default directory guest CSV files are written to
pub fn get_export_dir() -> PathBuf {
    get_data_dir().join(EXPORT_SUBDIR)
}

/// Returns the configuration directory
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(".contact-sync"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_is_in_data_dir() {
        let db_path = get_database_path();
        let data_dir = get_data_dir();

        assert!(
            db_path.starts_with(&data_dir),
            "Database path {} should be under data dir {}",
            db_path.display(),
            data_dir.display()
        );
        assert_eq!(
            db_path.file_name().and_then(|n| n.to_str()),
            Some(DATABASE_FILE)
        );
    }

    #[test]
    fn test_export_dir_is_under_data_dir() {
        let export_dir = get_export_dir();

        assert!(export_dir.starts_with(get_data_dir()));
        assert_eq!(
            export_dir.file_name().and_then(|n| n.to_str()),
            Some(EXPORT_SUBDIR)
        );
    }

    #[test]
    fn test_all_paths_use_app_name() {
        for path in [get_data_dir(), get_export_dir(), get_config_dir()] {
            assert!(
                path.to_string_lossy().contains(APP_DATA_DIR),
                "path should contain '{APP_DATA_DIR}': {}",
                path.display()
            );
        }
    }
}
