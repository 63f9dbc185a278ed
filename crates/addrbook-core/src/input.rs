use crate::domain::{ContactField, ContactRecord};
use std::io;

/// Source of answers for interactive prompts. Implemented by the console
/// front end; tests feed scripted answers.
pub trait InputProvider {
    fn prompt(&mut self, label: &str) -> io::Result<String>;
}

impl<F> InputProvider for F
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        self(label)
    }
}

/// Asks for each field in column order. Answers are trimmed but not
/// validated; pass the record to `Contact::new`.
pub fn gather_record<P>(input: &mut P) -> io::Result<ContactRecord>
where
    P: InputProvider + ?Sized,
{
    let mut record = ContactRecord::default();
    for field in ContactField::ALL {
        let answer = input.prompt(field.prompt_label())?;
        record.set(field, answer.trim().to_string());
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::gather_record;
    use crate::domain::Contact;
    use std::collections::VecDeque;
    use std::io;

    #[test]
    fn gather_record_prompts_in_field_order() {
        let mut answers: VecDeque<&str> = [
            " Aarav ",
            "Mehta",
            "Street 7",
            "Mumbai",
            "Maharashtra",
            "400001",
            "+91 9876501234",
            "aarav@mail.com",
        ]
        .into_iter()
        .collect();
        let mut labels = Vec::new();
        let mut provider = |label: &str| {
            labels.push(label.to_string());
            answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        };

        let record = gather_record(&mut provider).expect("gather");
        assert_eq!(record.first_name, "Aarav");
        assert!(Contact::new(record).is_ok());
        assert_eq!(labels.first().map(String::as_str), Some("First Name"));
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn gather_record_propagates_eof() {
        let mut provider =
            |_: &str| -> io::Result<String> { Err(io::Error::from(io::ErrorKind::UnexpectedEof)) };
        assert!(gather_record(&mut provider).is_err());
    }
}
