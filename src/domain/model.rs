//! PESEL 領域模型與批次處理報表
//!
//! `BirthDate` 是以日期建立、尚未產生號碼的紀錄；`Pesel` 一定同時帶有日期與 11 位數字。
//! 兩者皆為不可變值，狀態轉換由 `core::codec` 的 `decode` / `encode` / `generate` 完成。

use crate::core::codec;
use crate::domain::ports::SequenceSource;
use crate::utils::error::PeselError;
use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// 已確認落在 1800-01-01 ~ 2299-12-31 之間的出生日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// 驗證 `NaiveDate` 是否在 PESEL 支援範圍內
    pub fn from_naive_date(date: NaiveDate) -> Result<Self, PeselError> {
        if date < codec::MIN_DATE || date > codec::MAX_DATE {
            return Err(PeselError::DateOutOfRange { date });
        }
        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 產生此日期的新號碼，等同 `codec::generate`
    pub fn generate<S: SequenceSource + ?Sized>(&self, source: &mut S) -> Pesel {
        codec::generate(self, source)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 完整的 PESEL 號碼：出生日期 + 11 位數字
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pesel {
    date: NaiveDate,
    digits: String,
}

impl Pesel {
    /// 僅供 codec 使用；呼叫端須保證 `digits` 與 `date` 一致且校驗碼正確
    pub(crate) fn from_parts(date: NaiveDate, digits: String) -> Self {
        Self { date, digits }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn birth_date(&self) -> BirthDate {
        BirthDate(self.date)
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// 第 7~10 位的隨機序號
    pub fn sequence(&self) -> u16 {
        self.digits[6..10]
            .bytes()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
    }

    pub fn checksum(&self) -> u8 {
        self.digits.as_bytes()[10] - b'0'
    }

    /// 以相同出生日期重新產生號碼，前六位不變，序號與校驗碼重算
    pub fn regenerate<S: SequenceSource + ?Sized>(&self, source: &mut S) -> Pesel {
        codec::generate(&self.birth_date(), source)
    }

    /// 依 strftime 格式輸出出生日期
    pub fn to_date(&self, format: &str) -> Result<String, PeselError> {
        format_date(self.date, format)
    }
}

impl fmt::Display for Pesel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for Pesel {
    type Err = PeselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode(s)
    }
}

/// chrono 的 `format` 在格式錯誤時會於 Display 階段 panic，這裡先解析再寫入
pub fn format_date(date: NaiveDate, format: &str) -> Result<String, PeselError> {
    let invalid = || PeselError::InvalidDateFormat {
        format: format.to_string(),
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut output = String::new();
    write!(output, "{}", date.format_with_items(items.iter())).map_err(|_| invalid())?;
    Ok(output)
}

/// 讀入的單一輸入檔
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub lines: Vec<String>,
}

/// 成功解出出生日期的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEntry {
    pub pesel: String,
    pub birth_date: String,
}

/// 無法解析的一行，行號從 1 開始
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidLine {
    pub line_number: usize,
    pub line: String,
    pub reason: String,
    /// `PeselError::kind()` 的分類標籤
    pub kind: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub source_path: String,
    pub processed: usize,
    pub entries: Vec<BirthdayEntry>,
    pub invalid_lines: Vec<InvalidLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub output_path: String,
    pub processed: usize,
    pub valid: usize,
    pub invalid: usize,
    pub invalid_lines: Vec<InvalidLine>,
}

/// 無法讀取或寫入而被略過的檔案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub files_number: usize,
    pub processed: usize,
    pub valid: usize,
    pub invalid: usize,
    pub files: Vec<FileReport>,
    pub failed_files: Vec<FailedFile>,
}

impl BatchReport {
    pub fn new(files_number: usize) -> Self {
        Self {
            files_number,
            ..Self::default()
        }
    }

    pub fn add_file(&mut self, report: FileReport) {
        self.processed += report.processed;
        self.valid += report.valid;
        self.invalid += report.invalid;
        self.files.push(report);
    }

    pub fn add_failure(&mut self, path: impl Into<String>, error: impl fmt::Display) {
        self.failed_files.push(FailedFile {
            path: path.into(),
            error: error.to_string(),
        });
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} file(s), {} PESEL numbers ({} valid, {} invalid)",
            self.files_number, self.processed, self.valid, self.invalid
        )
    }

    /// verbose 模式下逐行列出的無效號碼
    pub fn invalid_messages(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|file| {
                file.invalid_lines.iter().map(move |invalid| {
                    format!(
                        "{}: invalid PESEL found at line {}: {}",
                        file.path, invalid.line_number, invalid.line
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_rejects_broken_format() {
        let date = NaiveDate::from_ymd_opt(1920, 2, 20).unwrap();
        assert_eq!(format_date(date, "%d-%m-%Y").unwrap(), "20-02-1920");
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "1920-02-20");
        assert!(matches!(
            format_date(date, "%Q"),
            Err(PeselError::InvalidDateFormat { .. })
        ));
        // 日期沒有時間欄位
        assert!(matches!(
            format_date(date, "%H:%M"),
            Err(PeselError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_birth_date_range() {
        let low = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap();
        let high = NaiveDate::from_ymd_opt(2299, 12, 31).unwrap();
        assert!(BirthDate::from_naive_date(low).is_ok());
        assert!(BirthDate::from_naive_date(high).is_ok());
        assert!(matches!(
            BirthDate::from_naive_date(low.pred_opt().unwrap()),
            Err(PeselError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            BirthDate::from_naive_date(high.succ_opt().unwrap()),
            Err(PeselError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_batch_report_totals_and_messages() {
        let mut report = BatchReport::new(3);
        report.add_file(FileReport {
            path: "/data/a.txt".to_string(),
            output_path: "/data/a-birthdays.txt".to_string(),
            processed: 3,
            valid: 2,
            invalid: 1,
            invalid_lines: vec![InvalidLine {
                line_number: 2,
                line: "123".to_string(),
                reason: "123 has invalid length 3, expected 11".to_string(),
                kind: "invalid_length".to_string(),
            }],
        });
        report.add_file(FileReport {
            path: "/data/b.txt".to_string(),
            processed: 4,
            valid: 4,
            ..FileReport::default()
        });
        report.add_failure("/data/missing.txt", "No such file or directory");

        assert_eq!(
            report.summary(),
            "Processed 3 file(s), 7 PESEL numbers (6 valid, 1 invalid)"
        );
        assert_eq!(
            report.invalid_messages(),
            vec!["/data/a.txt: invalid PESEL found at line 2: 123".to_string()]
        );
        assert_eq!(report.failed_files.len(), 1);
    }
}
