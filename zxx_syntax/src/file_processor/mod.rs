//! File processor with compile-time limits

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use std::path::Path;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, ZXX_EXTENSION,
};

/// Read a file with preferences taken from the environment
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::from_preferences(&FileProcessorPreferences::default()).process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Initialize file processor logging validation (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes;

    codes::validate_codes(&[
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
        codes::success::FILE_PROCESSING_SUCCESS,
    ])?;

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.zxx");
        fs::write(&file_path, "use fmt\n").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.metadata.line_count, 2);
    }

    #[test]
    fn test_compile_time_constants_access() {
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
        assert!(LARGE_FILE_THRESHOLD <= get_max_file_size());
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }

    #[test]
    fn test_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_zxx_extension: true,
            enable_performance_logging: true,
        };
        assert!(create_processor_from_preferences(&prefs).require_zxx_extension);
    }
}
