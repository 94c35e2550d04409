pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::codec::{compute_checksum, decode, encode, encode_prefix, generate};
pub use crate::core::sequence::RandomSequence;
pub use crate::core::{etl::EtlEngine, BirthdayPipeline};
pub use crate::domain::model::{BatchReport, BirthDate, FileReport, Pesel};
pub use crate::domain::ports::{OutputFormat, SequenceSource};
pub use crate::utils::error::{EtlError, PeselError, Result};
