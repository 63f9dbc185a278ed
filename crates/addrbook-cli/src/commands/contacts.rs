use crate::commands::shell::StdioConsole;
use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{parse_assignment, resolve_book_name};
use addrbook_core::domain::{Contact, ContactField, ContactRecord, ContactUpdate};
use addrbook_core::gather_record;
use addrbook_store::SortKey;
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args, ValueEnum};
use tracing::warn;

#[derive(Debug, Args)]
pub struct AddContactArgs {
    #[arg(long)]
    pub book: Option<String>,
    /// Prompt for every field instead of reading flags
    #[arg(long, action = ArgAction::SetTrue)]
    pub interactive: bool,
    #[arg(long, required_unless_present = "interactive")]
    pub first_name: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub last_name: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub address: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub city: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub state: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub zip_code: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub phone_number: Option<String>,
    #[arg(long, required_unless_present = "interactive")]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditContactArgs {
    #[arg(long)]
    pub book: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// New value as field=value; repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DeleteContactArgs {
    #[arg(long)]
    pub book: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub book: Option<String>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortArg {
    Name,
    City,
    State,
    Zip,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::City => SortKey::City,
            SortArg::State => SortKey::State,
            SortArg::Zip => SortKey::Zip,
        }
    }
}

pub fn add_contact(ctx: &mut Context<'_>, args: AddContactArgs) -> Result<()> {
    if args.interactive && ctx.json {
        return Err(invalid_input(
            "--interactive prompts on stdout and cannot be combined with --json",
        ));
    }
    let book_name = resolve_book_name(ctx.config, args.book.as_deref())?;
    ctx.book(&book_name)?;

    let record = if args.interactive {
        let mut console = StdioConsole::new();
        gather_record(&mut console).with_context(|| "read contact details")?
    } else {
        ContactRecord {
            first_name: args.first_name.unwrap_or_default(),
            last_name: args.last_name.unwrap_or_default(),
            address: args.address.unwrap_or_default(),
            city: args.city.unwrap_or_default(),
            state: args.state.unwrap_or_default(),
            zip_code: args.zip_code.unwrap_or_default(),
            phone_number: args.phone_number.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
        }
    };
    let contact = Contact::new(record)?;
    let name = contact.full_name();

    if !ctx.book_mut(&book_name)?.add_contact(contact.clone()) {
        return Err(invalid_input(format!(
            "contact already exists in {book_name}: {name}"
        )));
    }
    ctx.store.save()?;

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("added {} to {}", name, book_name);
    }
    Ok(())
}

pub fn edit_contact(ctx: &mut Context<'_>, args: EditContactArgs) -> Result<()> {
    let book_name = resolve_book_name(ctx.config, args.book.as_deref())?;
    if args.set.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let mut pairs = Vec::with_capacity(args.set.len());
    for raw in &args.set {
        let (field, value) = parse_assignment(raw)?;
        if ContactField::parse(&field).is_none() {
            warn!(field = %field, "ignoring unknown field");
        }
        pairs.push((field, value));
    }
    let update = ContactUpdate::from_pairs(pairs);

    let edited = ctx
        .book_mut(&book_name)?
        .edit_contact_by_name(&args.first_name, &args.last_name, &update)?
        .cloned()
        .ok_or_else(|| {
            not_found(format!(
                "contact {} {} in {book_name}",
                args.first_name, args.last_name
            ))
        })?;
    ctx.store.save()?;

    if ctx.json {
        print_json(&edited)?;
    } else {
        println!("updated {} in {}", edited.full_name(), book_name);
    }
    Ok(())
}

pub fn delete_contact(ctx: &mut Context<'_>, args: DeleteContactArgs) -> Result<()> {
    let book_name = resolve_book_name(ctx.config, args.book.as_deref())?;
    let removed = ctx
        .book_mut(&book_name)?
        .delete_contact_by_name(&args.first_name, &args.last_name)
        .ok_or_else(|| {
            not_found(format!(
                "contact {} {} in {book_name}",
                args.first_name, args.last_name
            ))
        })?;
    ctx.store.save()?;

    if ctx.json {
        print_json(&removed)?;
    } else {
        println!("deleted {} from {}", removed.full_name(), book_name);
    }
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let book_name = resolve_book_name(ctx.config, args.book.as_deref())?;
    let book = ctx.book(&book_name)?;
    let contacts: Vec<&Contact> = match args.sort {
        Some(sort) => book.sorted_by(sort.into()),
        None => book.contacts().iter().collect(),
    };

    if ctx.json {
        print_json(&contacts)?;
        return Ok(());
    }

    if contacts.is_empty() {
        println!("no contacts");
        return Ok(());
    }

    for contact in contacts {
        println!("{}", contact);
        println!();
    }
    Ok(())
}
