use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    Add(BookAddArgs),
    Ls(BookListArgs),
}

#[derive(Debug, Args)]
pub struct BookAddArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct BookListArgs {}

#[derive(Debug, Serialize)]
struct BookSummaryDto {
    name: String,
    contacts: usize,
}

pub fn add_book(ctx: &mut Context<'_>, args: BookAddArgs) -> Result<()> {
    ctx.store.system_mut().add_address_book(&args.name)?;
    ctx.store.save()?;

    let name = args.name.trim();
    if ctx.json {
        print_json(&serde_json::json!({ "name": name }))?;
    } else {
        println!("created address book {}", name);
    }
    Ok(())
}

pub fn list_books(ctx: &Context<'_>, _args: BookListArgs) -> Result<()> {
    let items: Vec<BookSummaryDto> = ctx
        .store
        .system()
        .books()
        .map(|(name, book)| BookSummaryDto {
            name: name.to_string(),
            contacts: book.len(),
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no address books");
        return Ok(());
    }

    for item in items {
        println!("{} ({})", item.name, item.contacts);
    }
    Ok(())
}
