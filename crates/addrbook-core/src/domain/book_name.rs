use crate::error::CoreError;

/// Book names are compared exactly; only surrounding whitespace is dropped.
pub fn normalize_book_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyBookName);
    }
    Ok(trimmed.to_string())
}
