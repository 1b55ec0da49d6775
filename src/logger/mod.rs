mod report;

pub use report::{PipelineLogger, StageCsv};
