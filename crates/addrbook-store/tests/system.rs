use addrbook_core::domain::{Contact, ContactRecord};
use addrbook_store::error::StoreError;
use addrbook_store::AddressBookSystem;

fn contact(first: &str, city: &str, state: &str) -> Contact {
    Contact::new(ContactRecord {
        first_name: first.to_string(),
        last_name: "Sharma".to_string(),
        address: "Street 7".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: "110001".to_string(),
        phone_number: "+919876543210".to_string(),
        email: "user@mail.com".to_string(),
    })
    .expect("valid contact")
}

#[test]
fn add_address_book_rejects_duplicate_name() {
    let mut system = AddressBookSystem::new();
    system.add_address_book("Family").expect("create");
    let err = system.add_address_book("Family").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateBook(name) if name == "Family"));
    assert_eq!(system.len(), 1);

    system.add_address_book("family").expect("names are case sensitive");
    assert_eq!(system.book_names(), vec!["Family", "family"]);
}

#[test]
fn add_address_book_rejects_blank_name() {
    let mut system = AddressBookSystem::new();
    assert!(matches!(
        system.add_address_book("  "),
        Err(StoreError::Core(_))
    ));
}

#[test]
fn get_address_book_never_creates() {
    let mut system = AddressBookSystem::new();
    assert!(system.get_address_book("Work").is_none());
    assert!(system.is_empty());

    system.add_address_book("Work").expect("create");
    assert!(system.get_address_book("Work").is_some());
    assert!(system.get_address_book_mut("Work").is_some());
}

#[test]
fn search_by_city_tags_each_hit_with_its_book() {
    let mut system = AddressBookSystem::new();
    system
        .add_address_book("Family")
        .expect("create")
        .add_contact(contact("Asha", "Delhi", "Delhi"));
    let work = system.add_address_book("Work").expect("create");
    work.add_contact(contact("Vikram", "Mumbai", "MH"));
    work.add_contact(contact("Rohan", "delhi", "Delhi"));

    let hits = system.search_by_city("DELHI");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].book, "Family");
    assert_eq!(hits[0].contact.first_name(), "Asha");
    assert_eq!(hits[1].book, "Work");
    assert_eq!(hits[1].contact.first_name(), "Rohan");

    assert!(system.search_by_state("Goa").is_empty());
}

#[test]
fn search_by_state_matches_any_case_across_books() {
    let mut system = AddressBookSystem::new();
    system
        .add_address_book("Family")
        .expect("create")
        .add_contact(contact("Asha", "Chennai", "Tamil Nadu"));
    let work = system.add_address_book("Work").expect("create");
    work.add_contact(contact("Vikram", "Mumbai", "MH"));
    work.add_contact(contact("Rohan", "Madurai", "tamil nadu"));

    let hits = system.search_by_state("TAMIL NADU");
    let found: Vec<(&str, &str)> = hits
        .iter()
        .map(|hit| (hit.book, hit.contact.first_name()))
        .collect();
    assert_eq!(found, vec![("Family", "Asha"), ("Work", "Rohan")]);
    assert_eq!(hits[1].contact.state(), "tamil nadu");
}

#[test]
fn grouping_uses_stored_case() {
    let mut system = AddressBookSystem::new();
    let book = system.add_address_book("Friends").expect("create");
    book.add_contact(contact("Asha", "Delhi", "Delhi"));
    book.add_contact(contact("Rohan", "delhi", "Delhi"));
    book.add_contact(contact("Vikram", "Delhi", "UP"));

    let by_city = system.view_all_grouped_by_city();
    assert_eq!(by_city.len(), 2);
    assert_eq!(by_city["Delhi"].len(), 2);
    assert_eq!(by_city["Delhi"][1].contact.first_name(), "Vikram");
    assert_eq!(by_city["delhi"].len(), 1);

    let by_state = system.view_all_grouped_by_state();
    assert_eq!(by_state["Delhi"].len(), 2);
    assert_eq!(by_state["UP"][0].book, "Friends");
}

#[test]
fn count_by_state_spans_books() {
    let mut system = AddressBookSystem::new();
    let first = system.add_address_book("A").expect("create");
    first.add_contact(contact("Asha", "Delhi", "Delhi"));
    first.add_contact(contact("Rohan", "Noida", "UP"));
    system
        .add_address_book("B")
        .expect("create")
        .add_contact(contact("Vikram", "Mumbai", "MH"));

    let counts = system.count_by_state();
    assert_eq!(counts.len(), 3);
    assert_eq!(counts["Delhi"], 1);
    assert_eq!(counts["UP"], 1);
    assert_eq!(counts["MH"], 1);

    let cities = system.count_by_city();
    assert_eq!(cities.values().sum::<usize>(), 3);
}
