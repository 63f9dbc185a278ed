use crate::error::invalid_input;
use addrbook_config::AppConfig;
use anyhow::Result;

/// `--book` wins over `default_book` from the config.
pub fn resolve_book_name(config: &AppConfig, book: Option<&str>) -> Result<String> {
    let name = book
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or(config.default_book.as_deref());
    match name {
        Some(name) => Ok(name.to_string()),
        None => Err(invalid_input(
            "no address book selected: pass --book or set default_book in config",
        )),
    }
}

/// Splits `field=value`. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| invalid_input(format!("expected field=value, got {raw}")))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(invalid_input(format!("missing field name in {raw}")));
    }
    Ok((field.to_string(), value.trim().to_string()))
}
