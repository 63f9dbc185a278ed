use crate::error::{Result, SyncError};
use crate::format::ParsedRecord;
use addrbook_core::domain::{Contact, ContactField, ContactRecord};

pub fn header() -> String {
    ContactField::ALL
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn export_csv(contacts: &[Contact]) -> String {
    let mut out = header();
    out.push('\n');
    for contact in contacts {
        let row = ContactField::ALL
            .iter()
            .map(|field| escape_csv_value(contact.get(*field)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// The header must list the eight fields in column order. Rows with the
/// wrong number of columns are reported per record.
pub fn parse_csv(data: &str) -> Result<Vec<ParsedRecord>> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut rows = split_rows(data)?.into_iter();

    let Some((_, columns)) = rows.next() else {
        return Err(SyncError::Parse("missing csv header".to_string()));
    };
    let expected = ContactField::ALL
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>();
    let found = columns.iter().map(|value| value.trim()).collect::<Vec<_>>();
    if found != expected {
        return Err(SyncError::Parse(format!(
            "unexpected csv header: {}",
            columns.join(",")
        )));
    }

    Ok(rows
        .map(|(line, values)| ParsedRecord {
            position: line,
            contact: decode_row(line, values),
        })
        .collect())
}

fn decode_row(line: usize, values: Vec<String>) -> Result<Contact> {
    if values.len() != ContactField::ALL.len() {
        return Err(SyncError::Parse(format!(
            "line {line}: expected {} columns, found {}",
            ContactField::ALL.len(),
            values.len()
        )));
    }
    let mut record = ContactRecord::default();
    for (field, value) in ContactField::ALL.into_iter().zip(values) {
        record.set(field, value);
    }
    Ok(Contact::new(record)?)
}

fn split_rows(data: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut started = false;
    let mut line = 1;
    let mut row_line = 1;

    let mut chars = data.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                started = true;
            }
            '\r' => {}
            '\n' => {
                if started {
                    row.push(std::mem::take(&mut field));
                    rows.push((row_line, std::mem::take(&mut row)));
                    started = false;
                }
                line += 1;
                row_line = line;
            }
            _ => {
                field.push(ch);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(SyncError::Parse(format!(
            "unterminated quoted field starting on line {row_line}"
        )));
    }
    if started {
        row.push(field);
        rows.push((row_line, row));
    }
    Ok(rows)
}

fn escape_csv_value(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_csv_value, export_csv, header, parse_csv, split_rows};
    use crate::error::SyncError;
    use addrbook_core::domain::{Contact, ContactRecord};

    fn contact(first: &str, address: &str) -> Contact {
        Contact::new(ContactRecord {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            address: address.to_string(),
            city: "Delhi".to_string(),
            state: "Delhi".to_string(),
            zip_code: "110001".to_string(),
            phone_number: "+91 9876543210".to_string(),
            email: "john@example.com".to_string(),
        })
        .expect("valid contact")
    }

    #[test]
    fn header_matches_column_order() {
        assert_eq!(
            header(),
            "first_name,last_name,address,city,state,zip_code,phone_number,email"
        );
    }

    #[test]
    fn export_quotes_embedded_commas() {
        let data = export_csv(&[contact("John", "12 ABC Rd, Block C")]);
        let lines: Vec<&str> = data.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "John,Doe,\"12 ABC Rd, Block C\",Delhi,Delhi,110001,+91 9876543210,john@example.com"
        );
    }

    #[test]
    fn escape_doubles_quotes() {
        assert_eq!(escape_csv_value("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_value("plain"), "plain");
    }

    #[test]
    fn parse_reads_back_export() {
        let data = export_csv(&[contact("John", "12 ABC Rd, Block C"), contact("Jane", "7 Lane")]);
        let records = parse_csv(&data).expect("parse");
        assert_eq!(records.len(), 2);
        let first = records[0].contact.as_ref().expect("first contact");
        assert_eq!(first.address(), "12 ABC Rd, Block C");
        assert_eq!(records[1].position, 3);
    }

    #[test]
    fn parse_accepts_crlf_and_skips_blank_lines() {
        let data = format!(
            "{}\r\nJohn,Doe,7 Lane,Delhi,Delhi,110001,+919876543210,john@example.com\r\n\r\n",
            header()
        );
        let records = parse_csv(&data).expect("parse");
        assert_eq!(records.len(), 1);
        assert!(records[0].contact.is_ok());
    }

    #[test]
    fn parse_reports_short_rows_per_record() {
        let data = format!(
            "{}\nJohn,Doe\nJane,Doe,7 Lane,Delhi,Delhi,110001,+919876543210,jane@example.com\n",
            header()
        );
        let records = parse_csv(&data).expect("parse");
        assert!(matches!(records[0].contact, Err(SyncError::Parse(_))));
        assert!(records[1].contact.is_ok());
    }

    #[test]
    fn parse_rejects_wrong_header() {
        let err = parse_csv("name,email\n").unwrap_err();
        assert!(err.to_string().contains("unexpected csv header"));
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn split_rows_keeps_newlines_inside_quotes() {
        let rows = split_rows("a,\"b\nc\"\nd,e\n").expect("split");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, vec!["a".to_string(), "b\nc".to_string()]);
        assert_eq!(rows[1].0, 3);
    }

    #[test]
    fn split_rows_rejects_unterminated_quote() {
        assert!(split_rows("a,\"b\n").is_err());
    }
}
