//! Terminal implementations of the list-sync collaborators.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use list_sync::{Confirmer, ListSurface, Notification, Notifier};
use views::TableBody;

/// Where console text goes: stdout, or a buffer for tests.
#[derive(Debug, Clone)]
pub enum Output {
    Stdout,
    Buffer(Arc<Mutex<String>>),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout
    }

    pub fn buffer() -> Self {
        Output::Buffer(Arc::new(Mutex::new(String::new())))
    }

    /// Writes `text` followed by a newline.
    pub fn line(&self, text: &str) {
        match self {
            Output::Stdout => println!("{text}"),
            Output::Buffer(buffer) => {
                let mut buffer = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                buffer.push_str(text);
                buffer.push('\n');
            }
        }
    }

    /// Everything written so far; empty for stdout.
    pub fn contents(&self) -> String {
        match self {
            Output::Stdout => String::new(),
            Output::Buffer(buffer) => buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

/// Lays rows out as aligned text columns, led by the id and followed by
/// the offered actions. A placeholder is printed as-is.
pub fn render_table(columns: &[&str], body: &TableBody) -> String {
    let rows = match body {
        TableBody::Placeholder(message) => return message.clone(),
        TableBody::Rows(rows) => rows,
    };

    let header: Vec<String> = std::iter::once("ID")
        .chain(columns.iter().copied())
        .chain(std::iter::once("Actions"))
        .map(str::to_string)
        .collect();

    let mut grid = vec![header];
    for row in rows {
        let actions: Vec<&str> = row.actions.iter().map(|a| a.as_str()).collect();
        grid.push(
            std::iter::once(row.id.to_string())
                .chain(row.cells.iter().map(|c| c.text.clone()))
                .chain(std::iter::once(actions.join(",")))
                .collect(),
        );
    }

    let width_count = grid.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..width_count)
        .map(|col| {
            grid.iter()
                .filter_map(|line| line.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    grid.iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints each rendered body as a table.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    columns: &'static [&'static str],
    out: Output,
}

impl TerminalSurface {
    pub fn new(columns: &'static [&'static str], out: Output) -> Self {
        Self { columns, out }
    }
}

impl ListSurface for TerminalSurface {
    fn render(&self, body: &TableBody) {
        self.out.line(&render_table(self.columns, body));
    }
}

/// Prints notifications as `<level>: <message>`.
///
/// The process exits long before a notification would expire, so nothing is
/// ever removed.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    out: Output,
}

impl TerminalNotifier {
    pub fn new(out: Output) -> Self {
        Self { out }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        self.out
            .line(&format!("{}: {}", notification.level, notification.message));
    }
}

/// Asks on stdin, unless told to assume yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirmer {
    assume_yes: bool,
}

impl PromptConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            print!("{prompt} [y/N] ");
            std::io::stdout().flush()?;
            let mut answer = String::new();
            std::io::stdin().read_line(&mut answer)?;
            Ok::<_, std::io::Error>(answer)
        })
        .await;

        match answer {
            Ok(Ok(answer)) => is_yes(&answer),
            Ok(Err(error)) => {
                tracing::warn!(%error, "could not read confirmation");
                false
            }
            Err(error) => {
                tracing::warn!(%error, "confirmation prompt failed");
                false
            }
        }
    }
}
