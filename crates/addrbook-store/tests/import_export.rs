use addrbook_core::domain::{Contact, ContactRecord};
use addrbook_core::rules::ImportPolicy;
use addrbook_store::error::{StoreError, StoreErrorKind};
use addrbook_store::AddressBook;
use std::fs;
use tempfile::TempDir;

fn contact(first: &str, last: &str, address: &str) -> Contact {
    Contact::new(ContactRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        address: address.to_string(),
        city: "Chennai".to_string(),
        state: "Tamil Nadu".to_string(),
        zip_code: "600001".to_string(),
        phone_number: "+91 9876543210".to_string(),
        email: "alice@example.com".to_string(),
    })
    .expect("valid contact")
}

fn seeded_book() -> AddressBook {
    let mut book = AddressBook::new();
    book.add_contact(contact("Alice", "Smith", "123 Main St"));
    book.add_contact(contact("Bala", "Murugan", "4/2, Gandhi Road, Block-B"));
    book.add_contact(contact("Chitra", "Iyer", "9 Lake View"));
    book
}

fn records(book: &AddressBook) -> Vec<ContactRecord> {
    book.contacts()
        .iter()
        .map(|contact| contact.record().clone())
        .collect()
}

#[test]
fn csv_round_trip_reproduces_contacts() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    let original = seeded_book();

    let written = original.export_to_csv(&path).expect("export csv");
    assert_eq!(written, 3);

    let mut restored = AddressBook::new();
    let report = restored
        .import_from_csv(&path, ImportPolicy::Abort)
        .expect("import csv");
    assert_eq!(report.added, 3);
    assert_eq!(records(&restored), records(&original));
}

#[test]
fn json_round_trip_reproduces_contacts() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("nested").join("contacts.json");
    let original = seeded_book();

    original.export_to_json(&path).expect("export json");

    let mut restored = AddressBook::new();
    restored
        .import_from_json(&path, ImportPolicy::Abort)
        .expect("import json");
    assert_eq!(records(&restored), records(&original));
}

#[test]
fn text_round_trip_reproduces_contacts() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.txt");
    let original = seeded_book();

    original.export_to_txt(&path).expect("export text");
    let data = fs::read_to_string(&path).expect("read export");
    assert!(data.contains("Address    : 4/2, Gandhi Road, Block-B, Chennai, Tamil Nadu - 600001"));

    let mut restored = AddressBook::new();
    restored
        .import_from_txt(&path, ImportPolicy::Abort)
        .expect("import text");
    assert_eq!(records(&restored), records(&original));
}

#[test]
fn import_skips_names_already_present() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    seeded_book().export_to_csv(&path).expect("export csv");

    let mut book = AddressBook::new();
    book.add_contact(contact("ALICE", "smith", "1 Other Road"));
    let report = book
        .import_from_csv(&path, ImportPolicy::Abort)
        .expect("import csv");
    assert_eq!(report.added, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(book.len(), 3);
    assert_eq!(book.contacts()[0].address(), "1 Other Road");
    assert_eq!(book.contacts()[1].first_name(), "Bala");
}

#[test]
fn import_missing_file_is_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let mut book = seeded_book();
    let err = book
        .import_from_json(&temp.path().join("missing.json"), ImportPolicy::Skip)
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
    assert_eq!(book.len(), 3);
}

fn mixed_csv(temp: &TempDir) -> std::path::PathBuf {
    let path = temp.path().join("mixed.csv");
    fs::write(
        &path,
        "first_name,last_name,address,city,state,zip_code,phone_number,email\n\
         Dev,Patel,1 Road,Surat,Gujarat,395001,+919876543210,dev@mail.com\n\
         Eva,Dsouza,2 Road,Goa,Goa,4030,+919876543210,eva@mail.com\n\
         Farah,Ali,3 Road,Agra,UP,282001,+919876543210,farah@mail.com\n",
    )
    .expect("write csv");
    path
}

#[test]
fn abort_policy_leaves_book_untouched() {
    let temp = TempDir::new().expect("temp dir");
    let path = mixed_csv(&temp);
    let mut book = seeded_book();

    let err = book
        .import_from_csv(&path, ImportPolicy::Abort)
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord { position: 3, .. }));
    assert_eq!(book.len(), 3);
}

#[test]
fn skip_policy_keeps_valid_records() {
    let temp = TempDir::new().expect("temp dir");
    let path = mixed_csv(&temp);
    let mut book = AddressBook::new();

    let report = book
        .import_from_csv(&path, ImportPolicy::Skip)
        .expect("import csv");
    assert_eq!(report.added, 2);
    assert_eq!(report.invalid, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("zip_code"));
    let firsts: Vec<&str> = book.contacts().iter().map(|c| c.first_name()).collect();
    assert_eq!(firsts, vec!["Dev", "Farah"]);
}

#[test]
fn malformed_file_fails_without_mutation() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "[{\"first_name\": ").expect("write json");
    let mut book = seeded_book();

    let err = book
        .import_from_json(&path, ImportPolicy::Skip)
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Sync);
    assert_eq!(book.len(), 3);
}
