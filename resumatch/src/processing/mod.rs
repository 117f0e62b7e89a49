//! Document ingestion: staging, text extraction, and the upload pipeline.

mod extractor;
mod pipeline;

pub use extractor::{PdfTextExtractor, TextExtractor};
pub use pipeline::{IngestOutcome, IngestionPipeline, UploadedFile};
