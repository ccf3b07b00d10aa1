//! File to declaration tree in one call

mod error;
mod result;

pub use error::PipelineError;
pub use result::PipelineResult;

use crate::ast::File;
use crate::config::runtime::LexicalPreferences;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use std::path::Path;
use std::time::Instant;

/// Read a file and build its declaration tree (file -> lexical -> tree)
pub fn process_file(file_path: &Path) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let display = file_path.display().to_string();

    logging::with_file_context(file_path, || {
        crate::log_info!("Starting Zxx file processing pipeline", "file" => display);

        // Stage 1: File processing
        let file_result = crate::file_processor::process_file(file_path)?;

        // Stage 2: Lexical pass into the tree builder
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences::default());
        let mut file = File::new();
        analyzer.build_tree(&file_result.source, &mut file)?;

        if !file.is_closed() {
            return Err(PipelineError::pipeline_error(
                "Declaration tree still open after end of input",
            ));
        }

        let result = PipelineResult::new(
            file,
            file_result.metadata,
            analyzer.metrics().clone(),
            start_time.elapsed(),
        );
        result.log_success(&display);

        Ok(result)
    })
}

/// Check that every code the pipeline can report is registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;

    logging::codes::validate_codes(&[
        logging::codes::success::TREE_CONSTRUCTION_COMPLETE,
        logging::codes::success::PIPELINE_COMPLETE,
        logging::codes::system::INTERNAL_ERROR,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;
    use crate::lexical::LexerError;
    use crate::logging::codes;
    use crate::tokens::{reconstruct, Kind};
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_file_builds_tree() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.zxx");
        let source = "use fmt\n\nfunc main() {\n\tfmt.print(1)\n}\n";
        fs::write(&path, source).unwrap();

        let result = process_file(&path).unwrap();
        assert!(result.file.is_closed());
        assert_eq!(result.file_metadata.size, source.len() as u64);
        assert_eq!(result.declaration_count(), 2);
        assert_eq!(result.symbol_count, result.lexical_metrics.total_symbols);
        assert_eq!(reconstruct(result.file.symbols()), source);

        let keywords: Vec<NodeKind> = result.file.declarations().map(|(_, n)| n.kind).collect();
        assert_eq!(
            keywords,
            vec![
                NodeKind::Declaration(Kind::Use),
                NodeKind::Declaration(Kind::Func)
            ]
        );
    }

    #[test]
    fn test_missing_file_is_file_processing_error() {
        let dir = tempdir().unwrap();
        let error = process_file(&dir.path().join("absent.zxx")).unwrap_err();

        assert_matches!(error, PipelineError::FileProcessing(_));
        assert_eq!(error.error_code(), codes::file_processing::FILE_NOT_FOUND);
    }

    #[test]
    fn test_lexical_failure_is_reported_with_code() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.zxx");
        fs::write(&path, "var s = \"open\n").unwrap();

        let error = process_file(&path).unwrap_err();
        assert_matches!(
            error,
            PipelineError::LexicalAnalysis(LexerError::IncompleteString { .. })
        );
        assert_eq!(error.error_code(), codes::lexical::INCOMPLETE_STRING);
    }

    #[test]
    fn test_tree_error_surfaces_through_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unbalanced.zxx");
        fs::write(&path, "func f() }\n").unwrap();

        let error = process_file(&path).unwrap_err();
        assert_matches!(error, PipelineError::LexicalAnalysis(LexerError::Sink { .. }));
        assert_eq!(error.error_code(), codes::tree::UNBALANCED_DELIMITER);
    }

    #[test]
    fn test_pipeline_error_helper() {
        let error = PipelineError::pipeline_error("stuck");
        assert_eq!(error.to_string(), "Pipeline error: stuck");
        assert_eq!(error.error_code(), codes::system::INTERNAL_ERROR);
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }
}
