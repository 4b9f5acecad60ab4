use crate::error::{Error, Result};
use url::Url;
use validator::{Validate, ValidationError};

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

pub fn validate<T: Validate>(val: &T) -> std::result::Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Absolute URL with an explicit scheme and host. `#[validate(url)]` accepts
/// host-less values like `mailto:x`, which are not usable as company links.
pub fn validate_absolute_url(raw: &str) -> std::result::Result<(), ValidationError> {
    let parsed = Url::parse(raw).map_err(|_| ValidationError::new("url"))?;
    if parsed.host_str().is_none() {
        return Err(ValidationError::new("url"));
    }
    Ok(())
}

pub fn is_absolute_url(raw: &str) -> bool {
    validate_absolute_url(raw).is_ok()
}

/// Resume constraint surface: PDF only, non-empty, at most 5 MiB. Checked
/// when the file is selected, not at submit time.
pub fn check_resume_attachment(file_name: &str, size: usize) -> Result<()> {
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(Error::Attachment("Only PDF files are accepted".to_string()));
    }
    if size == 0 {
        return Err(Error::Attachment("File is empty".to_string()));
    }
    if size > MAX_RESUME_BYTES {
        return Err(Error::Attachment(
            "File exceeds the 5 MiB size limit".to_string(),
        ));
    }
    Ok(())
}
