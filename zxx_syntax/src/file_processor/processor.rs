//! Reading Zxx source files under compile-time limits

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::utils::LineIndex;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

pub const ZXX_EXTENSION: &str = "zxx";

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .zxx, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    /// Lines as counted by the lexical pass (`\n`, `\r\n` and lone `\r`)
    pub line_count: usize,
    pub is_zxx_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Raw file bytes plus metadata. The bytes are not decoded here; the lexical
/// pass reports invalid encoding with a position.
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: Vec<u8>,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    /// Bytes read per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.source.len() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

pub struct FileProcessor {
    pub require_zxx_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_zxx_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_zxx_extension: prefs.require_zxx_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_zxx_extension_required(mut self, required: bool) -> Self {
        self.require_zxx_extension = required;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and collect its metadata
    pub fn process_file(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let display = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, &display)?;

        let source = fs::read(&path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, &path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => display,
                "io_error" => e);
            error
        })?;

        let line_count = LineIndex::new(&source).line_count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => display,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, &display);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms,
                "bytes_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        let display = file_path.display().to_string();

        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: display };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: display.clone(),
            };
            log_error!(error.error_code(), "File not found", "path" => display);
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: display.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display);
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(&e, file_path);
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => display,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_zxx_file = extension.as_deref() == Some(ZXX_EXTENSION);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_zxx_file,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_zxx" => is_zxx_file,
            "max_size_bytes" => MAX_FILE_SIZE);

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata, file_path: &str) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => metadata.size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if self.require_zxx_extension && !metadata.is_zxx_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .zxx extension",
                "file" => file_path,
                "extension" => metadata.extension.as_deref().unwrap_or("none"));
            return Err(error);
        }

        Ok(())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("main.zxx");
        let content = "use fmt\r\nfunc main()\rvar x\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();

        assert_eq!(result.source, content.as_bytes());
        assert_eq!(result.metadata.line_count, 4);
        assert!(result.metadata.is_zxx_file);
        assert!(!result.metadata.is_large_file());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.zxx");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_bytes_are_not_decoded() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("latin1.zxx");
        fs::write(&file_path, b"var s = '\xE9'\n").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.source.len(), 12);
    }

    #[test]
    fn test_file_not_found() {
        let error = FileProcessor::new()
            .process_file(Path::new("nonexistent.zxx"))
            .unwrap_err();
        assert_matches!(error, FileProcessorError::FileNotFound { .. });
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let error = FileProcessor::new().process_file(dir.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::InvalidPath { .. });

        let error = FileProcessor::new().process_file(Path::new("")).unwrap_err();
        assert_matches!(error, FileProcessorError::InvalidPath { .. });
    }

    #[test]
    fn test_compile_time_file_size_limit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("large.zxx");
        fs::write(&file_path, "a".repeat((MAX_FILE_SIZE + 1) as usize)).unwrap();

        let error = FileProcessor::new().process_file(&file_path).unwrap_err();
        assert_matches!(
            error,
            FileProcessorError::FileTooLarge { size, max_size } if size > MAX_FILE_SIZE && max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        fs::write(&file_path, "use fmt\n").unwrap();

        let error = FileProcessor::new()
            .with_zxx_extension_required(true)
            .process_file(&file_path)
            .unwrap_err();
        assert_matches!(
            error,
            FileProcessorError::InvalidExtension { extension: Some(ref ext) } if ext == "txt"
        );

        assert!(FileProcessor::new().process_file(&file_path).is_ok());
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("many_lines.zxx");
        fs::write(&file_path, "\n".repeat(MAX_LINE_COUNT_FOR_ANALYSIS)).unwrap();

        let error = FileProcessor::new().process_file(&file_path).unwrap_err();
        assert_matches!(
            error,
            FileProcessorError::TooManyLines { lines, max_lines }
                if lines == MAX_LINE_COUNT_FOR_ANALYSIS + 1 && max_lines == MAX_LINE_COUNT_FOR_ANALYSIS
        );
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "main.zxx".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), "Medium");
        assert!(!error.is_recoverable());
        assert!(error.requires_halt());
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_zxx_extension: true,
            enable_performance_logging: false,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_zxx_extension);
        assert!(!processor.enable_performance_logging);
    }
}
