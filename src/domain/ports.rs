use crate::domain::model::{FileReport, SourceFile, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 產生號碼時使用的 4 位隨機序號來源，值域 0..=9999
pub trait SequenceSource {
    fn next_sequence(&mut self) -> u16;
}

impl<S: SequenceSource + ?Sized> SequenceSource for &mut S {
    fn next_sequence(&mut self) -> u16 {
        (**self).next_sequence()
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_files(&self) -> &[String];
    fn date_format(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn output_suffix(&self) -> &str;
}

/// 輸出格式；text 為原始的 `{pesel} : {birthday}` 格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, path: &str) -> Result<SourceFile>;
    async fn transform(&self, source: SourceFile) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<FileReport>;
}
