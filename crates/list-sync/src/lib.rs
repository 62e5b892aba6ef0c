//! List synchronization for the library client.
//!
//! An [`EntityListSynchronizer`] owns one list view: it reloads the
//! collection from the server, renders it through a
//! [`RenderModel`](views::RenderModel), sends mutations and reloads after
//! each success. Collaborators are traits so tests can observe every step:
//! - [`ListSurface`] receives rendered rows
//! - [`Notifier`] receives the transient user messages
//! - [`Confirmer`] approves destructive operations
//!
//! Report generation, the preferences form and category options are served
//! by [`ReportGenerator`], [`PreferencesForm`] and [`CategoryLoader`].

pub mod categories;
pub mod config;
pub mod confirm;
mod dispatch;
pub mod error;
pub mod models;
pub mod notify;
pub mod outcome;
pub mod preferences;
pub mod reports;
pub mod state;
pub mod surface;
pub mod synchronizer;

pub use categories::CategoryLoader;
pub use config::{DEFAULT_NOTIFICATION_TTL, SyncConfig};
pub use confirm::{AlwaysConfirm, Confirmer, NeverConfirm, ScriptedConfirmer};
pub use error::{ErrorKind, Result, SyncError};
pub use models::render_model_for;
pub use notify::{Notification, NotificationBoard, NotificationLevel, Notifier};
pub use outcome::{MutationOutcome, ReloadOutcome};
pub use preferences::PreferencesForm;
pub use reports::ReportGenerator;
pub use state::ViewState;
pub use surface::{ListSurface, RecordingSurface};
pub use synchronizer::EntityListSynchronizer;
