//! Mutations, result dispatch and cache invalidation end to end
//! Run with: cargo test --test mutation_flow_test

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use common::{dashboard, FakeApi};
use merchant_console::application::dispatch::{NotifyingHandler, OperationProfile, UNEXPECTED_RESULT};
use merchant_console::application::errors::ApiError;
use merchant_console::application::mutation::{Mutation, NoopHandler};
use merchant_console::application::query::{InvalidationTarget, QueryOptions};
use merchant_console::domain::entities::{Notification, QueryKey, ResponseEnvelope, ResourceKind, Route};
use merchant_console::infrastructure::api::endpoints::{control, listings, offers};
use merchant_console::infrastructure::api::{ApiClient, Binding};
use merchant_console::Dashboard;

fn approve(dash: &Dashboard, profile: OperationProfile) -> Mutation<String> {
    let binding = Binding::new("approveListing", dash.api.clone(), |id: &String| {
        control::approve_listing(id)
    });
    Mutation::new(binding, Arc::new(NotifyingHandler::new(profile, dash.dispatcher.clone())))
}

async fn warm(dash: &Dashboard, api: &Arc<FakeApi>, id: &str) -> QueryKey {
    let api: Arc<dyn ApiClient> = api.clone();
    let binding = Binding::new("listById", api, |id: &String| listings::list_by_id(id));
    let key = QueryKey::with_params(listings::LIST_BY_ID, json!({ "id": id }));
    dash.queries
        .query(key.clone(), binding.fetcher(id.to_string()), QueryOptions::default())
        .await;
    key
}

#[tokio::test]
async fn test_success_notifies_invalidates_and_refetches() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Ok(ResponseEnvelope::ok(json!({ "approvedListing": true }))),
    );
    let (dash, signals) = dashboard(api.clone());

    let one = warm(&dash, &api, "1").await;
    let two = warm(&dash, &api, "2").await;
    let offers_key = QueryKey::new(offers::OFFERS);
    dash.queries.cache().set(offers_key.clone(), json!([]));

    approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await
        .unwrap();

    assert_eq!(signals.notifications(), vec![Notification::success("Listing approved")]);
    assert_eq!(api.calls_to("/listings/1"), 2);
    assert_eq!(api.calls_to("/listings/2"), 2);
    assert!(!dash.queries.cache().get(&one).unwrap().stale);
    assert!(!dash.queries.cache().get(&two).unwrap().stale);
    assert!(dash.queries.cache().get(&offers_key).unwrap().is_fresh(None));
}

#[tokio::test]
async fn test_invalidation_without_refetch_waits_for_next_access() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Ok(ResponseEnvelope::ok(json!({ "approvedListing": true }))),
    );
    let (dash, _) = dashboard(api.clone());
    let key = warm(&dash, &api, "1").await;

    let profile = OperationProfile::new("approvedListing", "Listing approved")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Listing));
    approve(&dash, profile).mutate("1".to_string()).await.unwrap();

    assert!(dash.queries.cache().get(&key).unwrap().stale);
    assert_eq!(api.calls_to("/listings/1"), 1);

    warm(&dash, &api, "1").await;
    assert_eq!(api.calls_to("/listings/1"), 2);
}

#[tokio::test]
async fn test_success_flag_beats_sibling_error() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Ok(ResponseEnvelope::ok(json!({ "approvedListing": true, "error": "stale form" }))),
    );
    let (dash, signals) = dashboard(api.clone());

    approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await
        .unwrap();

    assert_eq!(signals.notifications(), vec![Notification::success("Listing approved")]);
}

#[tokio::test]
async fn test_soft_error_reads_envelope_error() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Ok(ResponseEnvelope::ok(json!({ "error": { "message": "Listing has no photos" } }))),
    );
    let (dash, signals) = dashboard(api.clone());
    let key = warm(&dash, &api, "1").await;

    approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await
        .unwrap();

    assert_eq!(signals.notifications(), vec![Notification::error("Listing has no photos")]);
    assert!(!dash.queries.cache().get(&key).unwrap().stale);
}

#[tokio::test]
async fn test_unrecognized_shape_is_informational() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Ok(ResponseEnvelope::ok(json!({ "queued": true }))),
    );
    let (dash, signals) = dashboard(api.clone());

    approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await
        .unwrap();

    assert_eq!(signals.notifications(), vec![Notification::info(UNEXPECTED_RESULT)]);
    assert!(signals.redirects().is_empty());
}

#[tokio::test]
async fn test_list_message_emits_one_notification_each() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Err(ApiError::Response {
            status: 400,
            data: json!({ "message": ["A", "B"] }),
        }),
    );
    let (dash, signals) = dashboard(api.clone());
    let key = warm(&dash, &api, "1").await;

    let result = approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await;

    assert!(result.is_err());
    assert_eq!(
        signals.notifications(),
        vec![Notification::error("A"), Notification::error("B")]
    );
    // a rejected mutation leaves the cache untouched
    assert!(dash.queries.cache().get(&key).unwrap().is_fresh(None));
}

#[tokio::test]
async fn test_scalar_message_emits_one_notification() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Err(ApiError::Response {
            status: 403,
            data: json!({ "message": "X" }),
        }),
    );
    let (dash, signals) = dashboard(api.clone());

    let _ = approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await;

    assert_eq!(signals.notifications(), vec![Notification::error("X")]);
}

#[tokio::test]
async fn test_missing_message_uses_fallback() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Err(ApiError::Response {
            status: 500,
            data: json!({ "statusCode": 500 }),
        }),
    );
    let (dash, signals) = dashboard(api.clone());

    let _ = approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await;

    let notes = signals.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, dash.config.notifications.fallback_message);
}

#[tokio::test]
async fn test_transport_error_is_reported() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/control/listings/1/approve",
        Err(ApiError::Transport("connection refused".into())),
    );
    let (dash, signals) = dashboard(api.clone());

    let _ = approve(&dash, control::approve_profile())
        .mutate("1".to_string())
        .await;

    assert_eq!(
        signals.notifications(),
        vec![Notification::error("Network error: connection refused")]
    );
}

#[tokio::test]
async fn test_navigation_effect() {
    let api = Arc::new(FakeApi::new());
    api.respond(
        "/listings",
        Ok(ResponseEnvelope::new(201, json!({ "createdListing": { "id": 12 } }))),
    );
    let (dash, signals) = dashboard(api.clone());

    let binding = Binding::new("createListing", dash.api.clone(), |body: &serde_json::Value| {
        listings::create(body.clone())
    });
    let handler = NotifyingHandler::new(listings::create_profile(), dash.dispatcher.clone());
    Mutation::new(binding, Arc::new(handler))
        .mutate(json!({ "title": "Sea view flat" }))
        .await
        .unwrap();

    assert_eq!(signals.notifications(), vec![Notification::success("Listing created")]);
    assert_eq!(signals.redirects(), vec![Route::Listings]);
}

#[tokio::test]
async fn test_concurrent_mutations_are_not_coalesced() {
    let api = Arc::new(FakeApi::new().with_delay(40));
    let (dash, _) = dashboard(api.clone());
    let binding = Binding::new("approveListing", dash.api.clone(), |id: &String| {
        control::approve_listing(id)
    });
    let mutation = Arc::new(Mutation::new(binding, Arc::new(NoopHandler)));
    assert!(!mutation.is_loading());

    let running = {
        let mutation = mutation.clone();
        tokio::spawn(async move {
            tokio::join!(mutation.mutate("1".to_string()), mutation.mutate("1".to_string()))
        })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(mutation.is_loading());

    let (a, b) = running.await.unwrap();
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(api.calls(), 2);
    assert!(!mutation.is_loading());
}
