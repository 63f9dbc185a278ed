use crate::error::{Result, SyncError};
use crate::format::ParsedRecord;
use addrbook_core::domain::{Contact, ContactRecord};
use serde_json::Value;

pub fn export_json(contacts: &[Contact]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(contacts)?;
    out.push('\n');
    Ok(out)
}

/// The top level must be an array. Each element is decoded on its own so one
/// bad object does not hide the others.
pub fn parse_json(data: &str) -> Result<Vec<ParsedRecord>> {
    let value: Value = serde_json::from_str(data)?;
    let Value::Array(items) = value else {
        return Err(SyncError::Parse(
            "expected a json array of contacts".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ParsedRecord {
            position: index + 1,
            contact: decode_item(item),
        })
        .collect())
}

fn decode_item(item: Value) -> Result<Contact> {
    let record: ContactRecord = serde_json::from_value(item)?;
    Ok(Contact::new(record)?)
}
