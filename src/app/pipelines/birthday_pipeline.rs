use crate::core::codec;
use crate::core::{
    BirthdayEntry, ConfigProvider, FileReport, InvalidLine, OutputFormat, Pipeline, SourceFile,
    Storage, TransformResult,
};
use crate::utils::error::Result;
use std::path::Path;

/// 讀取 PESEL 清單檔，逐行解出出生日期並寫出 `<name>-birthdays<.ext>`
pub struct BirthdayPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> BirthdayPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn render(&self, entries: &[BirthdayEntry]) -> Result<Vec<u8>> {
        match self.config.output_format() {
            OutputFormat::Text => {
                let mut output = String::new();
                for entry in entries {
                    output.push_str(&format!("{} : {}\n", entry.pesel, entry.birth_date));
                }
                Ok(output.into_bytes())
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                if entries.is_empty() {
                    writer.write_record(["pesel", "birth_date"])?;
                }
                for entry in entries {
                    writer.serialize(entry)?;
                }
                writer.into_inner().map_err(|e| crate::utils::error::EtlError::ProcessingError {
                    message: format!("Failed to flush CSV output: {}", e),
                })
            }
            OutputFormat::Json => Ok(serde_json::to_vec_pretty(entries)?),
        }
    }
}

/// `dir/name.ext` → `dir/name<suffix>.ext`；csv / json 格式在原副檔名後再接 `.csv` / `.json`，
/// 同名不同副檔名的輸入（`a.txt`、`a.dat`）才不會寫到同一個檔案
pub fn output_path_for(input: &str, suffix: &str, format: OutputFormat) -> String {
    let path = Path::new(input);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let original = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let extension = match format {
        OutputFormat::Text => original,
        OutputFormat::Csv | OutputFormat::Json => format!("{}.{}", original, format.as_str()),
    };

    let file_name = format!("{}{}{}", stem, suffix, extension);
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(file_name).to_string_lossy().into_owned()
        }
        _ => file_name,
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BirthdayPipeline<S, C> {
    async fn extract(&self, path: &str) -> Result<SourceFile> {
        let data = self.storage.read_file(path).await?;

        // 非 UTF-8 內容以替代字元保留，該行會因非法字元被判為無效
        let text = String::from_utf8_lossy(&data);
        let lines = text.lines().map(|line| line.trim_end().to_string()).collect();

        Ok(SourceFile {
            path: path.to_string(),
            lines,
        })
    }

    async fn transform(&self, source: SourceFile) -> Result<TransformResult> {
        let date_format = self.config.date_format();
        let mut entries = Vec::new();
        let mut invalid_lines = Vec::new();

        for (index, line) in source.lines.iter().enumerate() {
            let line_number = index + 1;
            match codec::decode(line) {
                Ok(pesel) => entries.push(BirthdayEntry {
                    pesel: pesel.to_string(),
                    birth_date: pesel.to_date(date_format)?,
                }),
                Err(e) => {
                    tracing::debug!("{}:{} rejected: {}", source.path, line_number, e);
                    invalid_lines.push(InvalidLine {
                        line_number,
                        line: line.clone(),
                        reason: e.to_string(),
                        kind: e.kind().to_string(),
                    });
                }
            }
        }

        Ok(TransformResult {
            source_path: source.path,
            processed: source.lines.len(),
            entries,
            invalid_lines,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<FileReport> {
        let output_path = output_path_for(
            &result.source_path,
            self.config.output_suffix(),
            self.config.output_format(),
        );

        let data = self.render(&result.entries)?;
        self.storage.write_file(&output_path, &data).await?;
        tracing::debug!("Wrote {} entries to {}", result.entries.len(), output_path);

        Ok(FileReport {
            path: result.source_path,
            output_path,
            processed: result.processed,
            valid: result.entries.len(),
            invalid: result.invalid_lines.len(),
            invalid_lines: result.invalid_lines,
        })
    }
}
