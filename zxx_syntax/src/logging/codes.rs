//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the crate logs. Each area owns a
//! numeric range: system `ERR0xx`, file processing `E00x-E01x`, lexical pass
//! `E02x`, tree building `E04x`, success `Ixxx`.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical pass error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_ENCODING: Code = Code::new("E020");
    pub const BAD_INDENTATION: Code = Code::new("E021");
    pub const INCOMPLETE_STRING: Code = Code::new("E022");
    pub const INCOMPLETE_BLOCK_COMMENT: Code = Code::new("E023");
    pub const SINK_REJECTED: Code = Code::new("E024");
}

/// Declaration tree error codes
pub mod tree {
    use super::Code;

    pub const UNEXPECTED_AT_ROOT: Code = Code::new("E040");
    pub const UNBALANCED_DELIMITER: Code = Code::new("E041");
    pub const UNCLOSED_DELIMITER: Code = Code::new("E042");
    pub const NESTING_TOO_DEEP: Code = Code::new("E043");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const TREE_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            // File processing errors
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Source file does not exist",
                "Verify the file path",
            ),
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Source file lacks the .zxx extension",
                "Rename the file or unset ZXX_REQUIRE_ZXX_EXTENSION",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Source file exceeds the compile-time size limit",
                "Split the file or rebuild with a larger max_file_size",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Permission denied while accessing source file",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error while reading source file",
                "Check disk and file system health",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Path is empty or not a regular file",
                "Pass the path of a regular file",
            ),
            ErrorMetadata::new(
                "E013",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Source file exceeds the compile-time line limit",
                "Split the file or rebuild with a larger max_line_count_for_analysis",
            ),
            // Lexical errors
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::High,
                false,
                true,
                "Input contains bytes that are not valid UTF-8",
                "Re-encode the source file as UTF-8",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Tabs and spaces are mixed in indentation",
                "Indent the whole document with either tabs or spaces",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "String literal is missing its closing quote",
                "Close the string literal",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Block comment is missing its closing ---",
                "Close the block comment with ---",
            ),
            ErrorMetadata::new(
                "E024",
                "Lexical",
                Severity::High,
                false,
                true,
                "Symbol consumer rejected a symbol",
                "Inspect the consumer error for details",
            ),
            // Tree errors
            ErrorMetadata::new(
                "E040",
                "Tree",
                Severity::Medium,
                false,
                true,
                "Symbol cannot appear at document root",
                "Start top-level lines with a declaration keyword",
            ),
            ErrorMetadata::new(
                "E041",
                "Tree",
                Severity::Medium,
                false,
                true,
                "Closing delimiter without a matching opener",
                "Remove the stray delimiter or add its opener",
            ),
            ErrorMetadata::new(
                "E042",
                "Tree",
                Severity::Medium,
                false,
                true,
                "Delimiter left open at end of input",
                "Close every ( [ and { before the end of the file",
            ),
            ErrorMetadata::new(
                "E043",
                "Tree",
                Severity::High,
                false,
                true,
                "Delimiter nesting exceeds the compile-time limit",
                "Flatten the expression or rebuild with a larger max_nesting_depth",
            ),
            // Success codes
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "No action required",
            ),
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Source file read successfully",
                "No action required",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Lexical pass completed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I040",
                "Tree",
                Severity::Low,
                true,
                false,
                "Declaration tree built",
                "No action required",
            ),
            ErrorMetadata::new(
                "I090",
                "Pipeline",
                Severity::Low,
                true,
                false,
                "File pipeline completed",
                "No action required",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Check that every listed code has registry metadata
pub fn validate_codes(codes: &[Code]) -> Result<(), String> {
    for code in codes {
        if get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}
