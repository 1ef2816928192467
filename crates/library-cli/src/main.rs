mod library;
mod menu;
mod models;
mod settings;
mod store;

use anyhow::Result;
use campus_core::logging::setup_logging;
use campus_core::prompt::Console;
use chrono::Local;
use clap::Parser;

use crate::library::Library;
use crate::settings::{Command, Settings};
use crate::store::BookStore;

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<()> {
    let settings = Settings::parse();
    setup_logging(&settings.log_level)?;

    let mut library = Library::open(BookStore::new(&settings.data_file));
    let mut console = Console::stdio();

    match settings.command() {
        Command::Add {
            title,
            author,
            isbn,
        } => {
            let outcome = library.add(&title, &author, &isbn);
            menu::report(&mut console, outcome, "Added.")?;
        }
        Command::List => menu::print_books(&mut console, &library)?,
        Command::Search { keyword } => menu::print_search(&mut console, &library, &keyword)?,
        Command::Issue { isbn, borrower } => {
            let outcome = library.issue(&isbn, &borrower, today());
            menu::report(&mut console, outcome, "Issued.")?;
        }
        Command::Return { isbn } => {
            let outcome = library.return_book(&isbn);
            menu::report(&mut console, outcome, "Returned.")?;
        }
        Command::Menu => menu::run_menu(&mut console, &mut library, today)?,
    }

    Ok(())
}
