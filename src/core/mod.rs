pub mod codec;
pub mod etl;
pub mod sequence;

pub use crate::app::pipelines::birthday_pipeline::BirthdayPipeline;
pub use crate::domain::model::{
    BatchReport, BirthDate, BirthdayEntry, FileReport, InvalidLine, Pesel, SourceFile,
    TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, Pipeline, SequenceSource, Storage};
pub use crate::utils::error::Result;
