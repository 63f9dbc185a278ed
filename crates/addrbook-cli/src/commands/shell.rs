use crate::commands::Context;
use crate::error::{invalid_input, not_found};
use addrbook_config::AppConfig;
use addrbook_core::domain::{Contact, ContactUpdate};
use addrbook_core::{gather_record, InputProvider};
use addrbook_store::{BookEntry, SortKey, Store};
use addrbook_sync::Format;
use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Book selected at start
    #[arg(long)]
    pub book: Option<String>,
}

/// Prompt source plus somewhere to print.
pub trait Console: InputProvider {
    fn say(&mut self, line: &str) -> io::Result<()>;
}

pub struct StdioConsole {
    stdin: io::Stdin,
}

impl StdioConsole {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl InputProvider for StdioConsole {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}: ", label)?;
        stdout.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Console for StdioConsole {
    fn say(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    CreateBook,
    ListBooks,
    SelectBook,
    AddContact,
    ListContacts,
    EditContact,
    DeleteContact,
    SortContacts,
    Export,
    Import,
    SearchByCity,
    SearchByState,
    GroupByCity,
    GroupByState,
    CountByCity,
    CountByState,
    Exit,
}

impl MenuAction {
    const MENU: [MenuAction; 17] = [
        MenuAction::CreateBook,
        MenuAction::ListBooks,
        MenuAction::SelectBook,
        MenuAction::AddContact,
        MenuAction::ListContacts,
        MenuAction::EditContact,
        MenuAction::DeleteContact,
        MenuAction::SortContacts,
        MenuAction::Export,
        MenuAction::Import,
        MenuAction::SearchByCity,
        MenuAction::SearchByState,
        MenuAction::GroupByCity,
        MenuAction::GroupByState,
        MenuAction::CountByCity,
        MenuAction::CountByState,
        MenuAction::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            MenuAction::CreateBook => "Create address book",
            MenuAction::ListBooks => "List address books",
            MenuAction::SelectBook => "Select address book",
            MenuAction::AddContact => "Add contact",
            MenuAction::ListContacts => "List contacts",
            MenuAction::EditContact => "Edit contact",
            MenuAction::DeleteContact => "Delete contact",
            MenuAction::SortContacts => "Sort contacts",
            MenuAction::Export => "Export contacts",
            MenuAction::Import => "Import contacts",
            MenuAction::SearchByCity => "Search by city",
            MenuAction::SearchByState => "Search by state",
            MenuAction::GroupByCity => "View grouped by city",
            MenuAction::GroupByState => "View grouped by state",
            MenuAction::CountByCity => "Count by city",
            MenuAction::CountByState => "Count by state",
            MenuAction::Exit => "Exit",
        }
    }

    const fn mutates(self) -> bool {
        matches!(
            self,
            MenuAction::CreateBook
                | MenuAction::AddContact
                | MenuAction::EditContact
                | MenuAction::DeleteContact
                | MenuAction::Import
        )
    }

    /// Options are numbered from 1; `0` exits.
    fn parse(raw: &str) -> Option<Self> {
        let choice: usize = raw.trim().parse().ok()?;
        match choice {
            0 => Some(MenuAction::Exit),
            n => MenuAction::MENU
                .get(n - 1)
                .copied()
                .filter(|action| *action != MenuAction::Exit),
        }
    }
}

pub fn launch(ctx: &mut Context<'_>, args: ShellArgs) -> Result<()> {
    let selected = args.book.or_else(|| ctx.config.default_book.clone());
    let mut console = StdioConsole::new();
    run_shell(ctx.store, ctx.config, selected, &mut console)
}

pub fn run_shell<C>(
    store: &mut Store,
    config: &AppConfig,
    selected: Option<String>,
    console: &mut C,
) -> Result<()>
where
    C: Console + ?Sized,
{
    let mut shell = Shell {
        store,
        config,
        selected,
        console,
    };
    shell.run()
}

struct Shell<'a, C: ?Sized> {
    store: &'a mut Store,
    config: &'a AppConfig,
    selected: Option<String>,
    console: &'a mut C,
}

impl<C> Shell<'_, C>
where
    C: Console + ?Sized,
{
    fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.console.prompt("Choose an option") {
                Ok(choice) => choice,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err.into()),
            };
            let Some(action) = MenuAction::parse(&choice) else {
                self.console.say(&format!("unknown option: {}", choice.trim()))?;
                continue;
            };
            if action == MenuAction::Exit {
                break;
            }

            debug!(action = action.label(), "shell action");
            match self.perform_and_save(action) {
                Ok(()) => {}
                Err(err) if is_end_of_input(&err) => break,
                Err(err) => self.console.say(&format!("error: {}", err))?,
            }
        }

        self.store.save()?;
        self.console.say("goodbye")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        let current = self.selected.as_deref().unwrap_or("none");
        self.console.say("")?;
        self.console
            .say(&format!("Address Book System (selected: {})", current))?;
        for (index, action) in MenuAction::MENU.iter().enumerate() {
            if *action == MenuAction::Exit {
                self.console.say(&format!(" 0. {}", action.label()))?;
            } else {
                self.console
                    .say(&format!("{:>2}. {}", index + 1, action.label()))?;
            }
        }
        Ok(())
    }

    fn perform_and_save(&mut self, action: MenuAction) -> Result<()> {
        self.perform(action)?;
        if action.mutates() {
            self.store.save()?;
        }
        Ok(())
    }

    fn perform(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::CreateBook => self.create_book(),
            MenuAction::ListBooks => self.list_books(),
            MenuAction::SelectBook => self.select_book(),
            MenuAction::AddContact => self.add_contact(),
            MenuAction::ListContacts => self.list_contacts(None),
            MenuAction::EditContact => self.edit_contact(),
            MenuAction::DeleteContact => self.delete_contact(),
            MenuAction::SortContacts => {
                let key = self.console.prompt("Sort by (name/city/state/zip)")?;
                let key = parse_sort_key(&key)?;
                self.list_contacts(Some(key))
            }
            MenuAction::Export => self.export(),
            MenuAction::Import => self.import(),
            MenuAction::SearchByCity => {
                let city = self.console.prompt("City")?;
                let lines = entry_lines(&self.store.system().search_by_city(city.trim()));
                self.say_all(lines, "no matches")
            }
            MenuAction::SearchByState => {
                let state = self.console.prompt("State")?;
                let lines = entry_lines(&self.store.system().search_by_state(state.trim()));
                self.say_all(lines, "no matches")
            }
            MenuAction::GroupByCity => {
                let lines = group_lines(self.store.system().view_all_grouped_by_city());
                self.say_all(lines, "no contacts")
            }
            MenuAction::GroupByState => {
                let lines = group_lines(self.store.system().view_all_grouped_by_state());
                self.say_all(lines, "no contacts")
            }
            MenuAction::CountByCity => {
                let lines = count_lines(self.store.system().count_by_city());
                self.say_all(lines, "no contacts")
            }
            MenuAction::CountByState => {
                let lines = count_lines(self.store.system().count_by_state());
                self.say_all(lines, "no contacts")
            }
            MenuAction::Exit => Ok(()),
        }
    }

    fn create_book(&mut self) -> Result<()> {
        let name = self.console.prompt("Address book name")?;
        self.store.system_mut().add_address_book(&name)?;
        let name = name.trim().to_string();
        self.console
            .say(&format!("created and selected address book {}", name))?;
        self.selected = Some(name);
        Ok(())
    }

    fn list_books(&mut self) -> Result<()> {
        let lines: Vec<String> = self
            .store
            .system()
            .books()
            .map(|(name, book)| {
                let marker = if self.selected.as_deref() == Some(name) {
                    "*"
                } else {
                    " "
                };
                format!("{} {} ({})", marker, name, book.len())
            })
            .collect();
        self.say_all(lines, "no address books")
    }

    fn select_book(&mut self) -> Result<()> {
        let name = self.console.prompt("Address book name")?;
        let name = name.trim();
        if self.store.system().get_address_book(name).is_none() {
            return Err(not_found(format!("address book {name}")));
        }
        self.selected = Some(name.to_string());
        self.console.say(&format!("selected {}", name))?;
        Ok(())
    }

    fn add_contact(&mut self) -> Result<()> {
        let book_name = self.selected_book()?;
        let record = gather_record(&mut *self.console)?;
        let contact = Contact::new(record)?;
        let name = contact.full_name();
        let added = self.book_mut(&book_name)?.add_contact(contact);
        let message = if added {
            format!("added {} to {}", name, book_name)
        } else {
            format!("contact already exists in {}: {}", book_name, name)
        };
        self.console.say(&message)?;
        Ok(())
    }

    fn list_contacts(&mut self, sort: Option<SortKey>) -> Result<()> {
        let book_name = self.selected_book()?;
        let book = self
            .store
            .system()
            .get_address_book(&book_name)
            .ok_or_else(|| not_found(format!("address book {book_name}")))?;
        let lines: Vec<String> = match sort {
            Some(key) => book
                .sorted_by(key)
                .into_iter()
                .map(|contact| format!("{}\n", contact))
                .collect(),
            None => book
                .list_contacts()
                .into_iter()
                .map(|text| format!("{}\n", text))
                .collect(),
        };
        self.say_all(lines, "no contacts")
    }

    fn edit_contact(&mut self) -> Result<()> {
        let book_name = self.selected_book()?;
        let first_name = self.console.prompt("First Name")?;
        let last_name = self.console.prompt("Last Name")?;

        let mut pairs = Vec::new();
        loop {
            let field = self.console.prompt("Field to edit (blank to finish)")?;
            if field.trim().is_empty() {
                break;
            }
            let value = self.console.prompt("New value")?;
            pairs.push((field, value.trim().to_string()));
        }
        let update = ContactUpdate::from_pairs(pairs);

        let edited = self
            .book_mut(&book_name)?
            .edit_contact_by_name(first_name.trim(), last_name.trim(), &update)?
            .map(Contact::full_name);
        let message = match edited {
            Some(name) => format!("updated {}", name),
            None => "contact not found".to_string(),
        };
        self.console.say(&message)?;
        Ok(())
    }

    fn delete_contact(&mut self) -> Result<()> {
        let book_name = self.selected_book()?;
        let first_name = self.console.prompt("First Name")?;
        let last_name = self.console.prompt("Last Name")?;
        let removed = self
            .book_mut(&book_name)?
            .delete_contact_by_name(first_name.trim(), last_name.trim());
        let message = match removed {
            Some(contact) => format!("deleted {}", contact.full_name()),
            None => "contact not found".to_string(),
        };
        self.console.say(&message)?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let book_name = self.selected_book()?;
        let format: Format = self.console.prompt("Format (txt/csv/json)")?.parse()?;
        let path = PathBuf::from(self.console.prompt("File path")?.trim());
        let count = self
            .store
            .system()
            .get_address_book(&book_name)
            .ok_or_else(|| not_found(format!("address book {book_name}")))?
            .export_to(format, &path)?;
        self.console
            .say(&format!("exported {} contacts to {}", count, path.display()))?;
        Ok(())
    }

    fn import(&mut self) -> Result<()> {
        let book_name = self.selected_book()?;
        let format: Format = self.console.prompt("Format (txt/csv/json)")?.parse()?;
        let path = PathBuf::from(self.console.prompt("File path")?.trim());
        let policy = self.config.import.on_invalid;
        let report = self.book_mut(&book_name)?.import_from(format, &path, policy)?;
        let mut lines = vec![format!(
            "added {}, duplicates {}, invalid {}",
            report.added, report.duplicates, report.invalid
        )];
        lines.extend(report.warnings.into_iter().map(|w| format!("- {}", w)));
        self.say_all(lines, "")
    }

    fn selected_book(&self) -> Result<String> {
        self.selected
            .clone()
            .ok_or_else(|| invalid_input("no address book selected"))
    }

    fn book_mut(&mut self, name: &str) -> Result<&mut addrbook_store::AddressBook> {
        self.store
            .system_mut()
            .get_address_book_mut(name)
            .ok_or_else(|| not_found(format!("address book {name}")))
    }

    fn say_all(&mut self, lines: Vec<String>, empty: &str) -> Result<()> {
        if lines.is_empty() {
            self.console.say(empty)?;
        }
        for line in lines {
            self.console.say(&line)?;
        }
        Ok(())
    }
}

fn parse_sort_key(raw: &str) -> Result<SortKey> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "name" => Ok(SortKey::Name),
        "city" => Ok(SortKey::City),
        "state" => Ok(SortKey::State),
        "zip" | "zip_code" => Ok(SortKey::Zip),
        other => Err(invalid_input(format!("unknown sort key: {other}"))),
    }
}

fn entry_lines(entries: &[BookEntry<'_>]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format!("[{}] {}", entry.book, entry.contact.full_name()))
        .collect()
}

fn group_lines(groups: std::collections::BTreeMap<&str, Vec<BookEntry<'_>>>) -> Vec<String> {
    let mut lines = Vec::new();
    for (value, entries) in groups {
        lines.push(format!("{} ({})", value, entries.len()));
        lines.extend(entry_lines(&entries).into_iter().map(|line| format!("  {}", line)));
    }
    lines
}

fn count_lines(counts: std::collections::BTreeMap<String, usize>) -> Vec<String> {
    counts
        .into_iter()
        .map(|(value, count)| format!("{}: {}", value, count))
        .collect()
}

fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::UnexpectedEof)
    })
}

#[cfg(test)]
mod tests {
    use super::{run_shell, Console, MenuAction};
    use addrbook_config::AppConfig;
    use addrbook_core::InputProvider;
    use addrbook_store::Store;
    use std::collections::VecDeque;
    use std::io;
    use tempfile::TempDir;

    struct ScriptedConsole {
        answers: VecDeque<String>,
        output: Vec<String>,
    }

    impl ScriptedConsole {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                output: Vec::new(),
            }
        }

        fn said(&self, needle: &str) -> bool {
            self.output.iter().any(|line| line.contains(needle))
        }
    }

    impl InputProvider for ScriptedConsole {
        fn prompt(&mut self, _label: &str) -> io::Result<String> {
            self.answers
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    impl Console for ScriptedConsole {
        fn say(&mut self, line: &str) -> io::Result<()> {
            self.output.push(line.to_string());
            Ok(())
        }
    }

    const ASHA: [&str; 8] = [
        "Asha",
        "Rao",
        "12 MG Road",
        "Pune",
        "Maharashtra",
        "411001",
        "+91 9876543210",
        "asha@mail.com",
    ];

    fn script<'a>(parts: &[&[&'a str]]) -> Vec<&'a str> {
        parts.concat()
    }

    #[test]
    fn menu_numbers_map_to_actions() {
        assert_eq!(MenuAction::parse("1"), Some(MenuAction::CreateBook));
        assert_eq!(MenuAction::parse(" 16 "), Some(MenuAction::CountByState));
        assert_eq!(MenuAction::parse("0"), Some(MenuAction::Exit));
        assert_eq!(MenuAction::parse("17"), None);
        assert_eq!(MenuAction::parse("add"), None);
    }

    #[test]
    fn creates_book_and_adds_contact() {
        let answers = script(&[&["1", "Friends", "4"], &ASHA, &["5", "0"]]);
        let mut console = ScriptedConsole::new(&answers);
        let mut store = Store::open_in_memory();

        run_shell(&mut store, &AppConfig::default(), None, &mut console).expect("shell");

        let book = store
            .system()
            .get_address_book("Friends")
            .expect("book created");
        assert_eq!(book.len(), 1);
        assert!(console.said("added Asha Rao to Friends"));
        assert!(console.said("Name       : Asha Rao"));
        assert!(console.said("goodbye"));
    }

    #[test]
    fn duplicate_contact_is_reported() {
        let answers = script(&[&["4"], &ASHA, &["4"], &ASHA, &["0"]]);
        let mut console = ScriptedConsole::new(&answers);
        let mut store = Store::open_in_memory();
        store
            .system_mut()
            .add_address_book("Friends")
            .expect("add book");

        run_shell(
            &mut store,
            &AppConfig::default(),
            Some("Friends".to_string()),
            &mut console,
        )
        .expect("shell");

        assert!(console.said("contact already exists in Friends: Asha Rao"));
        let book = store.system().get_address_book("Friends").expect("book");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn action_errors_keep_the_loop_running() {
        let mut invalid = ASHA;
        invalid[5] = "41100";
        let answers = script(&[&["4", "3", "Missing", "1", "Work", "4"], &invalid, &["0"]]);
        let mut console = ScriptedConsole::new(&answers);
        let mut store = Store::open_in_memory();

        run_shell(&mut store, &AppConfig::default(), None, &mut console).expect("shell");

        assert!(console.said("error: invalid input: no address book selected"));
        assert!(console.said("error: not found: address book Missing"));
        assert!(console.said("error: invalid value for zip_code: 41100"));
        let book = store.system().get_address_book("Work").expect("book");
        assert!(book.is_empty());
    }

    #[test]
    fn edit_applies_collected_fields() {
        let answers = script(&[
            &["4"],
            &ASHA,
            &["6", "asha", "rao", "city", "Mumbai", "zip_code", "400001", ""],
            &["15", "0"],
        ]);
        let mut console = ScriptedConsole::new(&answers);
        let mut store = Store::open_in_memory();
        store
            .system_mut()
            .add_address_book("Friends")
            .expect("add book");

        run_shell(
            &mut store,
            &AppConfig::default(),
            Some("Friends".to_string()),
            &mut console,
        )
        .expect("shell");

        let book = store.system().get_address_book("Friends").expect("book");
        let contact = book.find("Asha", "Rao").expect("contact");
        assert_eq!(contact.city(), "Mumbai");
        assert_eq!(contact.zip_code(), "400001");
        assert!(console.said("updated Asha Rao"));
        assert!(console.said("Mumbai: 1"));
    }

    #[test]
    fn unknown_option_and_end_of_input_exit_cleanly() {
        let mut console = ScriptedConsole::new(&["99"]);
        let mut store = Store::open_in_memory();

        run_shell(&mut store, &AppConfig::default(), None, &mut console).expect("shell");

        assert!(console.said("unknown option: 99"));
        assert!(console.said("goodbye"));
    }

    #[test]
    fn failed_save_is_reported_and_the_loop_continues() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("books.json");
        let mut store = Store::open(&path).expect("open store");
        std::fs::create_dir(temp.path().join("books.json.tmp")).expect("block temp file");
        let mut console = ScriptedConsole::new(&["1", "Family", "2"]);

        let result = run_shell(&mut store, &AppConfig::default(), None, &mut console);

        assert!(result.is_err());
        assert!(console.output.iter().any(|line| line.starts_with("error: ")));
        assert!(console.said("* Family (0)"));
        assert!(!path.exists());
    }

    #[test]
    fn exit_saves_snapshot() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("books.json");
        let mut store = Store::open(&path).expect("open store");
        let mut console = ScriptedConsole::new(&["1", "Family"]);

        run_shell(&mut store, &AppConfig::default(), None, &mut console).expect("shell");

        let reopened = Store::open(&path).expect("reopen");
        assert_eq!(reopened.system().book_names(), vec!["Family"]);
    }
}
