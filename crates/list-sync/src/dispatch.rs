//! Request helpers shared by the synchronizer and the form loaders.

use common::FilterSet;
use domain::{
    Collection, CollectionSnapshot, MutationReply, MutationRequest, decode_collection,
    decode_document, decode_mutation, decode_records,
};
use serde_json::{Map, Value};
use transport::{ApiRequest, Transport};

use crate::{MutationOutcome, Notification, Notifier, Result, SyncError};

pub(crate) async fn read_collection<T: Transport>(
    transport: &T,
    collection: &Collection,
    filters: &FilterSet,
) -> Result<CollectionSnapshot> {
    let response = transport.send(collection.list_request(filters)).await?;
    Ok(decode_collection(&response, collection)?)
}

pub(crate) async fn read_records<T: Transport>(
    transport: &T,
    request: ApiRequest,
) -> Result<Vec<Map<String, Value>>> {
    let response = transport.send(request).await?;
    Ok(decode_records(&response, None)?)
}

pub(crate) async fn read_document<T: Transport>(
    transport: &T,
    request: ApiRequest,
) -> Result<Value> {
    let response = transport.send(request).await?;
    Ok(decode_document(&response)?)
}

pub(crate) async fn send_mutation<T: Transport>(
    transport: &T,
    request: &MutationRequest,
    credential: Option<&str>,
) -> Result<MutationReply> {
    let response = transport.send(request.to_api_request(credential)).await?;
    Ok(decode_mutation(&response)?)
}

/// Text shown after a successful mutation, or `None` for silent ones.
pub(crate) fn success_message(request: &MutationRequest, reply: MutationReply) -> Option<String> {
    request.announce_success.then(|| {
        request
            .success_message
            .clone()
            .or(reply.message)
            .unwrap_or_else(|| request.default_success_message())
    })
}

/// Notifies and logs a failed mutation, classifying it for the caller.
pub(crate) fn mutation_failure<N: Notifier>(
    notifier: &N,
    ttl: std::time::Duration,
    request: &MutationRequest,
    error: SyncError,
) -> MutationOutcome {
    let message = error.user_message(
        request.transport_failure_message(),
        request.application_failure_message(),
    );
    tracing::warn!(path = %request.path, error = %error, "mutation failed");
    notifier.notify(Notification::error(message.clone(), ttl));

    match error.kind() {
        crate::ErrorKind::Application => MutationOutcome::Rejected { error, message },
        crate::ErrorKind::Transport => MutationOutcome::Failed { error, message },
    }
}
