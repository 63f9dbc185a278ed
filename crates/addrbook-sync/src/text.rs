use crate::error::{Result, SyncError};
use crate::format::ParsedRecord;
use addrbook_core::domain::{Contact, ContactRecord};

pub const SEPARATOR_WIDTH: usize = 40;

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub fn export_text(contacts: &[Contact]) -> String {
    let separator = separator();
    let mut out = String::new();
    for contact in contacts {
        out.push_str(&contact.to_string());
        out.push('\n');
        out.push_str(&separator);
        out.push_str("\n\n");
    }
    out
}

/// Reads the labelled four-line blocks written by `export_text`.
pub fn parse_text(data: &str) -> Result<Vec<ParsedRecord>> {
    let separator = separator();
    let mut records = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in data.lines() {
        if line.trim_end() == separator {
            if !block.is_empty() {
                let position = records.len() + 1;
                records.push(ParsedRecord {
                    position,
                    contact: decode_block(&block),
                });
                block.clear();
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        block.push(line);
    }

    if !block.is_empty() {
        let position = records.len() + 1;
        records.push(ParsedRecord {
            position,
            contact: decode_block(&block),
        });
    }

    Ok(records)
}

fn decode_block(lines: &[&str]) -> Result<Contact> {
    let mut name = None;
    let mut address = None;
    let mut phone = None;
    let mut email = None;

    for line in lines {
        let (label, value) = split_labelled(line)?;
        let slot = match label {
            "Name" => &mut name,
            "Address" => &mut address,
            "Phone" => &mut phone,
            "Email" => &mut email,
            other => {
                return Err(SyncError::Parse(format!("unknown label: {other}")));
            }
        };
        if slot.replace(value).is_some() {
            return Err(SyncError::Parse(format!("duplicate label: {label}")));
        }
    }

    let name = name.ok_or_else(|| missing("Name"))?;
    let address = address.ok_or_else(|| missing("Address"))?;
    let (first_name, last_name) = name
        .split_once(' ')
        .ok_or_else(|| SyncError::Parse(format!("name needs first and last: {name}")))?;
    let (street, city, state, zip_code) = split_address_line(address)?;

    let record = ContactRecord {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        address: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip_code.to_string(),
        phone_number: phone.ok_or_else(|| missing("Phone"))?.to_string(),
        email: email.ok_or_else(|| missing("Email"))?.to_string(),
    };
    Ok(Contact::new(record)?)
}

fn split_labelled(line: &str) -> Result<(&str, &str)> {
    let (label, value) = line
        .split_once(':')
        .ok_or_else(|| SyncError::Parse(format!("expected `Label : value`: {line}")))?;
    let value = value.strip_prefix(' ').unwrap_or(value);
    Ok((label.trim(), value))
}

/// `address, city, state - zip`. City and state never contain commas and the
/// zip is digits only, so splitting from the right recovers every part even
/// when the street itself has commas or dashes.
fn split_address_line(line: &str) -> Result<(&str, &str, &str, &str)> {
    let malformed = || SyncError::Parse(format!("malformed address line: {line}"));
    let (rest, zip_code) = line.rsplit_once(" - ").ok_or_else(malformed)?;
    let (rest, state) = rest.rsplit_once(", ").ok_or_else(malformed)?;
    let (street, city) = rest.rsplit_once(", ").ok_or_else(malformed)?;
    Ok((street, city, state, zip_code))
}

fn missing(label: &str) -> SyncError {
    SyncError::Parse(format!("missing {label} line"))
}
