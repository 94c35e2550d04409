//! PESEL 編解碼
//!
//! 號碼格式：`YY MM DD SSSS C`
//! - `YY`：出生年份後兩位
//! - `MM`：月份 + 20 × 世紀索引（見 [`CENTURIES`]）
//! - `DD`：日
//! - `SSSS`：隨機序號
//! - `C`：校驗碼
//!
//! 所有函式皆為純函式，不記錄日誌；錯誤一律回傳給呼叫端。

use crate::domain::model::{BirthDate, Pesel};
use crate::domain::ports::SequenceSource;
use crate::utils::error::PeselError;
use chrono::NaiveDate;

/// 世紀對照表，索引即月份欄位的偏移量 / 20。1800 年代排在最後（偏移 80）。
pub const CENTURIES: [i32; 5] = [1900, 2000, 2100, 2200, 1800];

pub const WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

pub const PESEL_LENGTH: usize = 11;

const MONTH_OFFSET: u32 = 20;

pub const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1800, 1, 1) {
    Some(date) => date,
    None => panic!("1800-01-01 is a calendar date"),
};

pub const MAX_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2299, 12, 31) {
    Some(date) => date,
    None => panic!("2299-12-31 is a calendar date"),
};

/// 世紀 → 索引（線性搜尋，表只有五項）
pub fn century_index(century: i32) -> Option<usize> {
    CENTURIES.iter().position(|&c| c == century)
}

/// 索引 → 世紀
pub fn century_for_index(index: usize) -> Option<i32> {
    CENTURIES.get(index).copied()
}

/// 計算前 10 位數字的校驗碼
pub fn compute_checksum(payload: &[u8; 10]) -> u8 {
    let sum: u32 = payload
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&digit, &weight)| u32::from(digit) * weight)
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// 出生日期對應的前六位數字（年、含世紀偏移的月、日）
pub fn encode_prefix(date: &BirthDate) -> String {
    let year = date.year();
    let century = year.div_euclid(100) * 100;
    // BirthDate 保證年份在 1800..=2299，因此一定查得到
    let index = century_index(century).unwrap_or_default() as u32;
    format!(
        "{:02}{:02}{:02}",
        year.rem_euclid(100),
        date.month() + index * MONTH_OFFSET,
        date.day()
    )
}

/// 解析並驗證 11 位字串
pub fn decode(input: &str) -> Result<Pesel, PeselError> {
    let length = input.chars().count();
    if length != PESEL_LENGTH {
        return Err(PeselError::InvalidLength {
            input: input.to_string(),
            length,
        });
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeselError::InvalidCharacters {
            input: input.to_string(),
        });
    }

    let digits: Vec<u8> = input.bytes().map(|b| b - b'0').collect();
    let pair = |at: usize| u32::from(digits[at]) * 10 + u32::from(digits[at + 1]);

    let year_value = pair(0) as i32;
    let month_field = pair(2);
    let day = pair(4);

    let (index, month) = (month_field / MONTH_OFFSET, month_field % MONTH_OFFSET);
    let year = century_for_index(index as usize).ok_or(PeselError::InvalidDate {
        year: year_value,
        month: month_field,
        day,
    })? + year_value;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(PeselError::InvalidDate { year, month, day })?;
    if date < MIN_DATE || date > MAX_DATE {
        return Err(PeselError::DateOutOfRange { date });
    }

    let mut payload = [0u8; 10];
    payload.copy_from_slice(&digits[..10]);
    let expected = compute_checksum(&payload);
    let got = digits[10];
    if expected != got {
        return Err(PeselError::ChecksumMismatch {
            input: input.to_string(),
            expected,
            got,
        });
    }

    Ok(Pesel::from_parts(date, input.to_string()))
}

/// 由出生日期建立尚未產生號碼的紀錄
pub fn encode(year: i32, month: u32, day: u32) -> Result<BirthDate, PeselError> {
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(PeselError::InvalidDate { year, month, day })?;
    BirthDate::from_naive_date(date)
}

/// 產生隨機（但有效）的號碼；不保證唯一
pub fn generate<S: SequenceSource + ?Sized>(date: &BirthDate, source: &mut S) -> Pesel {
    let sequence = source.next_sequence() % 10_000;
    let body = format!("{}{:04}", encode_prefix(date), sequence);

    let mut payload = [0u8; 10];
    for (slot, b) in payload.iter_mut().zip(body.bytes()) {
        *slot = b - b'0';
    }
    let checksum = compute_checksum(&payload);

    Pesel::from_parts(date.date(), format!("{}{}", body, checksum))
}
