//! Command-line client for the library management API.
//!
//! Provides:
//! - Environment configuration ([`Config`])
//! - The clap command tree ([`Cli`], [`Command`])
//! - Terminal implementations of the list-sync collaborators
//! - [`Console`], which runs one command against a transport

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod terminal;

pub use cli::{Cli, Command, PreferencesCommand};
pub use commands::Console;
pub use config::Config;
pub use error::{ConsoleError, Result};
pub use terminal::{Output, PromptConfirmer, TerminalNotifier, TerminalSurface, render_table};
