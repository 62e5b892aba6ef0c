//! Command-line arguments.

use clap::{Parser, Subcommand};
use common::FilterSet;

/// Command-line client for the library management API.
#[derive(Debug, Parser)]
#[command(name = "library-console", version, about)]
pub struct Cli {
    /// Server base URL. Overrides LIBRARY_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Credential sent with mutations. Overrides LIBRARY_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Comma separated capabilities. Overrides LIBRARY_CAPABILITIES.
    #[arg(long, global = true)]
    pub capabilities: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List a collection (books, users, fines, borrowings, notifications).
    List {
        collection: String,
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// Advanced book search.
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },

    /// Show the category filter options.
    Categories,

    /// Show the notification feed.
    Notifications,

    /// Mark a notification as read.
    MarkRead { id: String },

    /// Delete a record.
    Delete { collection: String, id: String },

    /// Mark a fine as paid.
    PayFine { id: String },

    /// Borrow a book.
    Borrow { book_id: String },

    /// Return a borrowed book.
    Return { borrowing_id: String },

    /// Add a book to the catalogue.
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Create a user account.
    AddUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },

    /// Change fields of a book. Only the given fields are sent.
    EditBook {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        publication_year: Option<String>,
        #[arg(long)]
        total_copies: Option<u32>,
    },

    /// Change fields of a user account. Only the given fields are sent.
    EditUser {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Generate a report.
    Report {
        #[arg(long = "type")]
        report_type: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },

    /// Show or change preferences.
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PreferencesCommand {
    Show,
    Set {
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        email_notifications: Option<bool>,
        #[arg(long)]
        sms_notifications: Option<bool>,
        #[arg(long)]
        timezone: Option<String>,
    },
}

impl Command {
    /// The filters a listing or search command reads with.
    pub fn filters(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        match self {
            Command::List {
                q,
                category,
                status,
                role,
                date,
                ..
            } => {
                filters.set_opt("q", q.clone());
                filters.set_opt("category", category.clone());
                filters.set_opt("status", status.clone());
                filters.set_opt("role", role.clone());
                filters.set_opt("date", date.clone());
            }
            Command::Search {
                title,
                author,
                isbn,
                category,
                year,
            } => {
                filters.set_opt("title", title.clone());
                filters.set_opt("author", author.clone());
                filters.set_opt("isbn", isbn.clone());
                filters.set_opt("category", category.clone());
                filters.set_opt("year", year.clone());
            }
            _ => {}
        }
        filters
    }
}
