use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfig {
            field: field_name.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfig {
                field: field_name.to_string(),
                reason: format!("unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfig {
            field: field_name.to_string(),
            reason: format!("invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfig {
            field: field_name.to_string(),
            reason: "path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfig {
            field: field_name.to_string(),
            reason: "path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfig {
            field: field_name.to_string(),
            reason: "value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
