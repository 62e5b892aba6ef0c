//! Integration tests for the list synchronizer over the in-memory transport.

use std::sync::{Arc, Mutex};

use common::FilterSet;
use domain::{Collection, MutationRequest};
use list_sync::{
    EntityListSynchronizer, MutationOutcome, Notification, NotificationBoard, NotificationLevel,
    Notifier, RecordingSurface, ReloadOutcome, ScriptedConfirmer, SyncConfig, ViewState,
    render_model_for,
};
use serde_json::{Value, json};
use transport::{InMemoryTransport, Method};
use views::{Capabilities, NotificationFeed, RowAction, TableBody};

type TestSynchronizer = EntityListSynchronizer<
    InMemoryTransport,
    RecordingSurface,
    NotificationBoard,
    ScriptedConfirmer,
>;

struct TestHarness {
    sync: TestSynchronizer,
    transport: InMemoryTransport,
    surface: RecordingSurface,
    board: NotificationBoard,
    confirmer: ScriptedConfirmer,
}

impl TestHarness {
    fn new(collection: Collection, answers: Vec<bool>) -> Self {
        Self::with_capabilities(collection, answers, Capabilities::all())
    }

    fn with_capabilities(
        collection: Collection,
        answers: Vec<bool>,
        capabilities: Capabilities,
    ) -> Self {
        let transport = InMemoryTransport::new();
        let surface = RecordingSurface::new();
        let board = NotificationBoard::new();
        let confirmer = ScriptedConfirmer::new(answers);
        let config = SyncConfig::new()
            .with_credential(Some("secret".to_string()))
            .with_capabilities(capabilities);

        let sync = EntityListSynchronizer::new(
            collection,
            render_model_for(&collection).unwrap(),
            config,
            transport.clone(),
            surface.clone(),
            board.clone(),
            confirmer.clone(),
        );

        Self {
            sync,
            transport,
            surface,
            board,
            confirmer,
        }
    }

    fn gets(&self) -> usize {
        self.transport.sent_with(Method::Get).len()
    }
}

fn books(ids: &[u64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                json!({
                    "book_id": id,
                    "title": format!("Book {id}"),
                    "author": "Anonymous",
                    "available_copies": 1,
                    "total_copies": 2
                })
            })
            .collect(),
    )
}

fn search_filters() -> FilterSet {
    FilterSet::new()
        .with("q", "Tolkien")
        .with("category", "")
        .with("status", "available")
}

#[tokio::test]
async fn reload_renders_one_row_per_entity() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[3, 1, 2]));

    let outcome = h.sync.reload(FilterSet::new()).await;

    assert!(matches!(outcome, ReloadOutcome::Rendered { rows: 3 }));
    assert_eq!(h.sync.state(), ViewState::Rendered);
    assert_eq!(h.sync.rows().len(), h.sync.snapshot().len());
    for (row, entity) in h.sync.rows().iter().zip(h.sync.snapshot().iter()) {
        assert_eq!(&row.id, entity.id());
    }
    assert_eq!(h.surface.render_count(), 1);
    assert!(h.board.all().is_empty());
}

#[tokio::test]
async fn reads_omit_empty_filters_and_credential() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[1]));

    h.sync.reload(search_filters()).await;

    let sent = h.transport.sent_requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path_and_query(), "/api/books?q=Tolkien&status=available");
    assert!(sent[0].api_key.is_none());
    assert_eq!(h.sync.active_filters(), &search_filters());
}

#[tokio::test]
async fn empty_result_renders_placeholder() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, json!({"success": true, "books": []}));

    let outcome = h.sync.reload(search_filters()).await;

    assert!(matches!(outcome, ReloadOutcome::Empty));
    assert!(outcome.is_success());
    assert_eq!(
        h.surface.current(),
        Some(TableBody::Placeholder("No books found".to_string()))
    );
    assert_eq!(h.sync.body().unwrap().row_count(), 1);
    assert!(h.sync.rows().is_empty());
    assert_eq!(h.sync.active_filters(), &search_filters());
    assert!(h.board.all().is_empty());
}

#[tokio::test]
async fn transport_failure_keeps_previous_rows() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[1, 2]));
    h.transport.fail(Method::Get, "/api/books", "connection reset");

    h.sync.reload(FilterSet::new()).await;
    let outcome = h.sync.reload(FilterSet::new().with("q", "x")).await;

    match outcome {
        ReloadOutcome::Failed { message, .. } => {
            assert_eq!(message, "Error loading books. Please try again.")
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(h.sync.state(), ViewState::Error);
    assert_eq!(h.sync.rows().len(), 2);
    assert_eq!(h.sync.snapshot().len(), 2);
    assert_eq!(h.surface.render_count(), 1);

    let notifications = h.board.all();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].ttl, std::time::Duration::from_secs(5));
}

#[tokio::test]
async fn malformed_body_is_a_transport_failure() {
    let mut h = TestHarness::new(Collection::users(), vec![]);
    h.transport
        .respond_raw(Method::Get, "/api/users", 200, "<html>Sign in</html>");

    let outcome = h.sync.reload(FilterSet::new()).await;

    assert!(!outcome.is_success());
    assert_eq!(h.board.messages(), vec!["Error loading users. Please try again."]);
    assert!(h.sync.body().is_none());
}

#[tokio::test]
async fn duplicate_identifiers_are_malformed() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[4, 4]));

    let outcome = h.sync.reload(FilterSet::new()).await;

    assert!(!outcome.is_success());
    assert_eq!(h.board.messages(), vec!["Error loading books. Please try again."]);
}

#[tokio::test]
async fn application_failure_on_read_is_shown_verbatim() {
    let mut h = TestHarness::new(Collection::book_search(), vec![]);
    h.transport.respond(
        Method::Get,
        "/api/books/search",
        200,
        json!({"success": false, "message": "Year must be a number"}),
    );

    h.sync.reload(FilterSet::new().with("year", "soon")).await;

    assert_eq!(h.board.messages(), vec!["Year must be a number"]);
    assert_eq!(h.sync.state(), ViewState::Error);
}

#[tokio::test]
async fn confirmed_delete_reloads_with_active_filters() {
    let mut h = TestHarness::new(Collection::books(), vec![true]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[41, 42]));
    h.transport.respond(Method::Get, "/api/books", 200, books(&[41]));
    h.transport
        .respond(Method::Delete, "/api/books/42", 200, json!({"success": true}));

    h.sync.reload(search_filters()).await;
    let outcome = h
        .sync
        .submit(MutationRequest::delete(&Collection::books(), 42u64))
        .await;

    assert!(outcome.is_applied());
    assert_eq!(outcome.message(), Some("Book deleted successfully!"));
    assert_eq!(
        h.confirmer.prompts(),
        vec!["Are you sure you want to delete this book?"]
    );

    let deletes = h.transport.sent_with(Method::Delete);
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].path, "/api/books/42");
    assert_eq!(deletes[0].api_key.as_deref(), Some("secret"));

    let gets = h.transport.sent_with(Method::Get);
    assert_eq!(gets.len(), 2);
    assert_eq!(gets[1].path_and_query(), "/api/books?q=Tolkien&status=available");

    assert_eq!(h.sync.rows().len(), 1);
    assert_eq!(h.surface.editor_closed_count(), 1);
    assert_eq!(h.board.messages(), vec!["Book deleted successfully!"]);
}

#[tokio::test]
async fn rejected_delete_shows_server_message_and_does_not_reload() {
    let mut h = TestHarness::new(Collection::books(), vec![true]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[42]));
    h.transport.respond(
        Method::Delete,
        "/api/books/42",
        409,
        json!({"success": false, "message": "Cannot delete: active loan"}),
    );

    h.sync.reload(FilterSet::new()).await;
    let rows_before = h.sync.rows().to_vec();
    let outcome = h
        .sync
        .submit(MutationRequest::delete(&Collection::books(), 42u64))
        .await;

    assert!(matches!(
        outcome,
        MutationOutcome::Rejected { ref message, .. } if message == "Cannot delete: active loan"
    ));
    assert_eq!(h.transport.sent_with(Method::Delete).len(), 1);
    assert_eq!(h.gets(), 1);
    assert_eq!(h.sync.rows(), rows_before.as_slice());
    assert_eq!(h.surface.render_count(), 1);
    assert_eq!(h.surface.editor_closed_count(), 0);
    assert_eq!(h.board.messages(), vec!["Cannot delete: active loan"]);
}

#[tokio::test]
async fn rejection_without_message_uses_label() {
    let mut h = TestHarness::new(Collection::books(), vec![true]);
    h.transport
        .respond(Method::Delete, "/api/books/7", 200, json!({"success": false}));

    let outcome = h
        .sync
        .submit(MutationRequest::delete(&Collection::books(), 7u64))
        .await;

    assert_eq!(outcome.message(), Some("Error deleting book"));
    assert_eq!(h.gets(), 0);
}

#[tokio::test]
async fn transport_failure_on_mutation_uses_generic_text() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[1]));
    h.transport.fail(Method::Post, "/api/books", "timed out");

    h.sync.reload(FilterSet::new()).await;
    let outcome = h
        .sync
        .mutate(MutationRequest::create(&Collection::books(), json!({"title": "Dune"})))
        .await;

    assert!(matches!(
        outcome,
        MutationOutcome::Failed { ref message, .. } if message == "Error saving book. Please try again."
    ));
    assert_eq!(h.gets(), 1);
    assert_eq!(h.sync.rows().len(), 1);
}

#[tokio::test]
async fn error_status_without_marker_is_a_transport_failure() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport
        .respond_raw(Method::Post, "/api/books", 500, "Internal Server Error");

    let outcome = h
        .sync
        .mutate(MutationRequest::create(&Collection::books(), json!({"title": "Dune"})))
        .await;

    assert_eq!(outcome.message(), Some("Error saving book. Please try again."));
    assert!(matches!(outcome, MutationOutcome::Failed { .. }));
}

#[tokio::test]
async fn update_puts_changes_and_reloads_with_active_filters() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Get, "/api/books", 200, books(&[7]));
    h.transport.respond(
        Method::Get,
        "/api/books",
        200,
        json!([{"book_id": 7, "title": "Renamed", "available_copies": 1, "total_copies": 2}]),
    );
    h.transport
        .respond(Method::Put, "/api/books/7", 200, json!({"success": true}));

    h.sync.reload(search_filters()).await;
    let outcome = h
        .sync
        .submit(MutationRequest::update(
            &Collection::books(),
            7u64,
            json!({"title": "Renamed"}),
        ))
        .await;

    assert!(outcome.is_applied());
    assert!(h.confirmer.prompts().is_empty());

    let puts = h.transport.sent_with(Method::Put);
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, "/api/books/7");
    assert_eq!(puts[0].body, Some(json!({"title": "Renamed"})));
    assert_eq!(puts[0].api_key.as_deref(), Some("secret"));

    let gets = h.transport.sent_with(Method::Get);
    assert_eq!(gets.len(), 2);
    assert_eq!(gets[1].path_and_query(), "/api/books?q=Tolkien&status=available");
    assert_eq!(h.sync.rows()[0].texts()[0], "Renamed");
    assert_eq!(h.surface.editor_closed_count(), 1);
    assert_eq!(h.board.messages(), vec!["Book updated successfully!"]);
}

#[tokio::test]
async fn rejected_update_keeps_rows_and_editor_open() {
    let mut h = TestHarness::new(Collection::users(), vec![]);
    h.transport.respond(
        Method::Get,
        "/api/users",
        200,
        json!([{"user_id": 5, "username": "ada", "is_active": true}]),
    );
    h.transport.respond(
        Method::Put,
        "/api/users/5",
        400,
        json!({"success": false, "message": "Email already in use"}),
    );

    h.sync.reload(FilterSet::new()).await;
    let rows_before = h.sync.rows().to_vec();
    let outcome = h
        .sync
        .mutate(MutationRequest::update(
            &Collection::users(),
            5u64,
            json!({"email": "taken@example.org"}),
        ))
        .await;

    assert!(matches!(
        outcome,
        MutationOutcome::Rejected { ref message, .. } if message == "Email already in use"
    ));
    assert_eq!(h.gets(), 1);
    assert_eq!(h.sync.rows(), rows_before.as_slice());
    assert_eq!(h.surface.editor_closed_count(), 0);
    assert_eq!(h.board.messages(), vec!["Email already in use"]);
}

#[tokio::test]
async fn declined_prompt_sends_nothing() {
    let mut h = TestHarness::new(Collection::fines(), vec![false]);

    let outcome = h.sync.submit(MutationRequest::pay_fine(5u64)).await;

    assert!(matches!(outcome, MutationOutcome::Cancelled));
    assert_eq!(h.transport.request_count(), 0);
    assert_eq!(
        h.confirmer.prompts(),
        vec!["Are you sure you want to mark this fine as paid?"]
    );
    assert!(h.board.all().is_empty());
}

#[tokio::test]
async fn create_without_prompt_skips_confirmer() {
    let mut h = TestHarness::new(Collection::books(), vec![]);
    h.transport.respond(Method::Post, "/api/books", 201, json!({"success": true, "book_id": 8}));
    h.transport.respond(Method::Get, "/api/books", 200, books(&[8]));

    let outcome = h
        .sync
        .submit(MutationRequest::create(&Collection::books(), json!({"title": "Dune"})))
        .await;

    assert_eq!(outcome.message(), Some("Book added successfully!"));
    assert!(h.confirmer.prompts().is_empty());
    let posts = h.transport.sent_with(Method::Post);
    assert_eq!(posts[0].body, Some(json!({"title": "Dune"})));
}

#[tokio::test]
async fn return_uses_server_message() {
    let mut h = TestHarness::new(Collection::borrowings(), vec![true]);
    h.transport.respond(
        Method::Post,
        "/api/borrowings/3/return",
        200,
        json!({"success": true, "message": "Book returned successfully"}),
    );
    h.transport.respond(Method::Get, "/api/borrowings", 200, json!([]));

    let outcome = h.sync.submit(MutationRequest::return_borrowing(3u64)).await;

    assert_eq!(outcome.message(), Some("Book returned successfully"));
    assert!(matches!(
        outcome,
        MutationOutcome::Applied { reload: Some(ReloadOutcome::Empty), .. }
    ));
}

#[tokio::test]
async fn empty_success_body_counts_as_success() {
    let mut h = TestHarness::new(Collection::users(), vec![true]);
    h.transport.respond_raw(Method::Delete, "/api/users/2", 204, "");
    h.transport.respond(Method::Get, "/api/users", 200, json!({"users": []}));

    let outcome = h
        .sync
        .submit(MutationRequest::delete(&Collection::users(), 2u64))
        .await;

    assert_eq!(outcome.message(), Some("User deleted successfully!"));
    assert_eq!(h.gets(), 1);
}

#[tokio::test]
async fn mark_read_reloads_without_banner() {
    let mut h = TestHarness::new(Collection::notifications(), vec![]);
    h.transport.respond(
        Method::Get,
        "/api/notifications",
        200,
        json!([
            {"notification_id": 9, "message": "Emma is due", "is_read": false,
             "created_at": "2024-06-01T08:30:00"},
            {"notification_id": 10, "message": "Welcome", "is_read": true}
        ]),
    );
    h.transport.respond(
        Method::Get,
        "/api/notifications",
        200,
        json!([
            {"notification_id": 9, "message": "Emma is due", "is_read": true},
            {"notification_id": 10, "message": "Welcome", "is_read": true}
        ]),
    );
    h.transport.respond(
        Method::Post,
        "/api/notifications/9/read",
        200,
        json!({"success": true}),
    );

    h.sync.reload(FilterSet::new()).await;
    let feed = NotificationFeed::from_entities(h.sync.snapshot().entities());
    assert_eq!(feed.unread_count, 1);
    assert_eq!(h.sync.rows()[0].actions, vec![RowAction::MarkRead]);

    let outcome = h.sync.submit(MutationRequest::mark_notification_read(9u64)).await;

    assert!(matches!(outcome, MutationOutcome::Applied { message: None, .. }));
    assert_eq!(h.gets(), 2);
    assert!(h.board.all().is_empty());
    let feed = NotificationFeed::from_entities(h.sync.snapshot().entities());
    assert_eq!(feed.unread_count, 0);
}

#[tokio::test]
async fn retry_reuses_active_filters() {
    let mut h = TestHarness::new(Collection::fines(), vec![]);
    h.transport.fail(Method::Get, "/api/fines", "offline");
    h.transport.respond(Method::Get, "/api/fines", 200, json!([{"id": 1, "status": "unpaid"}]));

    let filters = FilterSet::new().with("status", "unpaid");
    assert!(!h.sync.reload(filters.clone()).await.is_success());
    assert_eq!(h.sync.state(), ViewState::Error);

    let outcome = h.sync.retry().await;
    assert_eq!(outcome.row_count(), 1);
    assert_eq!(h.sync.state(), ViewState::Rendered);

    let gets = h.transport.sent_with(Method::Get);
    assert_eq!(gets[0].path_and_query(), gets[1].path_and_query());
    assert_eq!(gets[1].path_and_query(), "/api/fines?status=unpaid");
}

#[tokio::test]
async fn capabilities_decide_offered_actions() {
    let mut h = TestHarness::with_capabilities(Collection::books(), vec![], Capabilities::none());
    h.transport.respond(Method::Get, "/api/books", 200, books(&[1]));

    h.sync.reload(FilterSet::new()).await;

    assert_eq!(h.sync.rows()[0].actions, vec![RowAction::View]);
}

/// Records how many reads had been issued when each notification arrived.
#[derive(Clone)]
struct ProbeNotifier {
    transport: InMemoryTransport,
    seen: Arc<Mutex<Vec<(String, usize)>>>,
}

impl Notifier for ProbeNotifier {
    fn notify(&self, notification: Notification) {
        let gets = self.transport.sent_with(Method::Get).len();
        self.seen.lock().unwrap().push((notification.message, gets));
    }
}

#[tokio::test]
async fn success_message_follows_the_reload() {
    let transport = InMemoryTransport::new();
    let probe = ProbeNotifier {
        transport: transport.clone(),
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let collection = Collection::fines();
    let mut sync = EntityListSynchronizer::new(
        collection,
        render_model_for(&collection).unwrap(),
        SyncConfig::new(),
        transport.clone(),
        RecordingSurface::new(),
        probe.clone(),
        ScriptedConfirmer::new(vec![true]),
    );
    transport.respond(Method::Get, "/api/fines", 200, json!([{"id": 5, "status": "unpaid"}]));
    transport.respond(Method::Post, "/api/fines/5/pay", 200, json!({"success": true}));

    sync.reload(FilterSet::new()).await;
    sync.submit(MutationRequest::pay_fine(5u64)).await;

    let seen = probe.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![("Fine marked as paid successfully!".to_string(), 2)]
    );
}
