mod record;

pub use record::AnalysisRecord;
