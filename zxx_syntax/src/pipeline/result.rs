use crate::ast::File;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::logging::codes;
use std::time::Duration;

/// Declaration tree of one file plus the numbers gathered on the way
#[derive(Debug)]
pub struct PipelineResult {
    pub file: File,
    pub file_metadata: FileMetadata,
    pub lexical_metrics: LexicalMetrics,
    pub symbol_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        file: File,
        file_metadata: FileMetadata,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            symbol_count: file.symbols().iter().filter(|s| !s.is_eof()).count(),
            file,
            file_metadata,
            lexical_metrics,
            processing_duration,
        }
    }

    pub fn declaration_count(&self) -> usize {
        self.file.declarations().count()
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();

        crate::log_success!(
            codes::success::TREE_CONSTRUCTION_COMPLETE,
            "Declaration tree built",
            "declarations" => self.declaration_count(),
            "symbols" => self.symbol_count
        );

        crate::log_success!(
            codes::success::PIPELINE_COMPLETE,
            "Zxx file processing pipeline succeeded",
            "file" => file_path,
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "processing_rate_bytes_per_sec" => format!("{:.0}",
                self.file_metadata.size as f64 / seconds),
            "processing_rate_symbols_per_sec" => format!("{:.0}",
                self.symbol_count as f64 / seconds)
        );
    }
}
