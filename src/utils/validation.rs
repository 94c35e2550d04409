use crate::domain::model::format_date;
use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_input_files(field_name: &str, files: &[String]) -> Result<()> {
    if files.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for file in files {
        validate_path(field_name, file)?;
    }
    Ok(())
}

/// 以固定日期試格式化，確認 strftime 格式可用於純日期
pub fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;

    let sample = crate::core::codec::MIN_DATE;
    format_date(sample, format).map_err(|e| EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: format.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
