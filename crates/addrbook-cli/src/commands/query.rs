use crate::commands::{print_json, Context};
use addrbook_core::domain::ContactField;
use addrbook_store::BookEntry;
use anyhow::Result;
use clap::{ArgGroup, Args, ValueEnum};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("place").required(true).args(["city", "state"])))]
pub struct SearchArgs {
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
}

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[arg(long, value_enum)]
    pub by: PlaceField,
}

#[derive(Debug, Args)]
pub struct CountArgs {
    #[arg(long, value_enum)]
    pub by: PlaceField,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlaceField {
    City,
    State,
}

impl From<PlaceField> for ContactField {
    fn from(field: PlaceField) -> Self {
        match field {
            PlaceField::City => ContactField::City,
            PlaceField::State => ContactField::State,
        }
    }
}

pub fn search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let system = ctx.store.system();
    let hits = match (args.city.as_deref(), args.state.as_deref()) {
        (Some(city), _) => system.search_by_city(city),
        (None, Some(state)) => system.search_by_state(state),
        (None, None) => Vec::new(),
    };

    if ctx.json {
        print_json(&hits)?;
        return Ok(());
    }

    if hits.is_empty() {
        println!("no matches");
        return Ok(());
    }

    for hit in hits {
        print_entry(&hit);
    }
    Ok(())
}

pub fn group(ctx: &Context<'_>, args: GroupArgs) -> Result<()> {
    let groups = ctx.store.system().grouped_by(args.by.into());

    if ctx.json {
        print_json(&groups)?;
        return Ok(());
    }

    if groups.is_empty() {
        println!("no contacts");
        return Ok(());
    }

    for (value, entries) in groups {
        println!("{} ({})", value, entries.len());
        for entry in entries {
            print!("  ");
            print_entry(&entry);
        }
    }
    Ok(())
}

pub fn count(ctx: &Context<'_>, args: CountArgs) -> Result<()> {
    let counts = ctx.store.system().count_by(args.by.into());

    if ctx.json {
        print_json(&counts)?;
        return Ok(());
    }

    if counts.is_empty() {
        println!("no contacts");
        return Ok(());
    }

    for (value, count) in counts {
        println!("{}: {}", value, count);
    }
    Ok(())
}

fn print_entry(entry: &BookEntry<'_>) {
    println!(
        "{}  {}  {}, {}",
        entry.book,
        entry.contact.full_name(),
        entry.contact.city(),
        entry.contact.state()
    );
}
