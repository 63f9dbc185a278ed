pub mod book_name;
pub mod contact;
pub mod field;
pub mod update;

pub use book_name::normalize_book_name;
pub use contact::{Contact, ContactKey, ContactRecord};
pub use field::ContactField;
pub use update::ContactUpdate;
