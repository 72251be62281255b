use super::fakes::{api_error, configuration, FakeConfigurationApi};
use crate::error::AppError;
use crate::state::ConfigurationStore;
use packcalc_types::{
    CreatePackConfigurationRequest, UpdatePackConfigurationRequest, ValidationError,
};
use std::future::Future;
use std::sync::Arc;

fn seeded() -> (ConfigurationStore, Arc<FakeConfigurationApi>) {
    let api = Arc::new(FakeConfigurationApi::with(vec![
        configuration(1, "Standard", true),
        configuration(2, "Bulk", false),
        configuration(3, "Small", false),
    ]));
    (ConfigurationStore::new(api.clone()), api)
}

async fn loaded() -> (ConfigurationStore, Arc<FakeConfigurationApi>) {
    let (store, api) = seeded();
    store.load().await;
    (store, api)
}

#[tokio::test]
async fn test_load_replaces_cache() {
    let (store, api) = seeded();
    store.load().await;

    let state = store.snapshot();
    let ids: Vec<_> = state.configurations.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);

    api.server.lock().remove(0);
    store.load().await;
    assert_eq!(store.configurations().len(), 2);
}

#[tokio::test]
async fn test_load_failure_keeps_last_known_good() {
    let (store, api) = loaded().await;

    api.fail_next(api_error(503));
    store.load().await;

    let state = store.snapshot();
    assert_eq!(state.configurations.len(), 3);
    assert_eq!(state.error.as_deref(), Some("API request failed (503): status 503"));
    assert!(!state.is_loading);

    store.load().await;
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn test_load_default_selects() {
    let (store, _) = seeded();
    store.load_default().await;
    assert_eq!(store.selected().map(|c| c.id), Some(1));
}

#[tokio::test]
async fn test_load_default_absent_is_not_an_error() {
    let api = Arc::new(FakeConfigurationApi::with(vec![configuration(5, "Only", false)]));
    let store = ConfigurationStore::new(api);

    store.load_default().await;
    assert_eq!(store.selected(), None);
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn test_select_clears_error() {
    let (store, _) = loaded().await;
    store.set_error(Some("stale".to_string()));

    store.select(configuration(2, "Bulk", false));
    assert_eq!(store.selected().map(|c| c.id), Some(2));
    assert_eq!(store.error(), None);

    store.clear_selection();
    assert_eq!(store.selected(), None);
}

#[tokio::test]
async fn test_create_appends() {
    let (store, api) = loaded().await;
    let calls = api.calls();

    let created = store
        .create(CreatePackConfigurationRequest::new("Odd", vec![23, 31, 53]))
        .await
        .unwrap();

    assert_eq!(created.id, 4);
    assert_eq!(api.calls(), calls + 1);
    let cached = store.configurations();
    assert_eq!(cached.len(), 4);
    assert_eq!(cached.last(), Some(&created));
}

#[tokio::test]
async fn test_create_empty_name_rejected_locally() {
    let (store, api) = loaded().await;
    let before = store.configurations();
    let calls = api.calls();

    let err = store.create(CreatePackConfigurationRequest::new("", vec![100])).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(ValidationError::EmptyConfigurationName)));
    assert_eq!(api.calls(), calls);
    assert_eq!(store.configurations(), before);
    assert_eq!(store.error().as_deref(), Some("Configuration name cannot be empty"));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_create_failure_rethrows() {
    let (store, api) = loaded().await;
    api.fail_next(api_error(500));

    let err = store.create(CreatePackConfigurationRequest::new("X", vec![10])).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(store.configurations().len(), 3);
    assert!(store.error().is_some());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_delete_selected_clears_selection() {
    let (store, _) = loaded().await;
    store.load_default().await;
    assert_eq!(store.selected().map(|c| c.id), Some(1));

    store.delete(1).await.unwrap();

    let state = store.snapshot();
    assert!(state.find(1).is_none());
    assert_eq!(state.selected, None);
}

#[tokio::test]
async fn test_delete_other_keeps_selection() {
    let (store, _) = loaded().await;
    store.select(configuration(1, "Standard", true));

    store.delete(3).await.unwrap();
    assert_eq!(store.selected().map(|c| c.id), Some(1));
    assert_eq!(store.configurations().len(), 2);
}

#[tokio::test]
async fn test_delete_failure_untouched() {
    let (store, api) = loaded().await;
    store.select(configuration(2, "Bulk", false));
    api.fail_next(api_error(404));

    assert!(store.delete(2).await.is_err());
    assert_eq!(store.configurations().len(), 3);
    assert_eq!(store.selected().map(|c| c.id), Some(2));
    assert!(store.error().unwrap().contains("404"));
}

#[tokio::test]
async fn test_set_default_unique() {
    let (store, _) = loaded().await;

    let record = store.set_default(3).await.unwrap();

    assert_eq!(record.id, 3);
    assert!(record.is_default);
    let state = store.snapshot();
    for c in &state.configurations {
        assert_eq!(c.is_default, c.id == 3, "config {}", c.id);
    }
    assert_eq!(state.default_configuration().map(|c| c.id), Some(3));
    assert_eq!(state.selected, Some(record));
}

#[tokio::test]
async fn test_set_default_failure_untouched() {
    let (store, api) = loaded().await;
    let before = store.snapshot();
    api.fail_next(api_error(500));

    assert!(store.set_default(2).await.is_err());

    let after = store.snapshot();
    assert_eq!(after.configurations, before.configurations);
    assert_eq!(after.selected, before.selected);
    assert!(after.error.is_some());
    assert!(!after.is_loading);
}

#[tokio::test]
async fn test_update_replaces_entry_and_selection() {
    let (store, _) = loaded().await;
    store.select(configuration(2, "Bulk", false));

    let mut request = UpdatePackConfigurationRequest::new("Bulk XL", vec![5000, 10_000]);
    request.is_default = Some(true);
    let updated = store.update(2, request).await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.find(2), Some(&updated));
    assert_eq!(state.selected, Some(updated));
    for c in &state.configurations {
        assert_eq!(c.is_default, c.id == 2);
    }
}

#[tokio::test]
async fn test_update_invalid_sizes_rejected_locally() {
    let (store, api) = loaded().await;
    let calls = api.calls();

    let err = store
        .update(1, UpdatePackConfigurationRequest::new("Standard", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(ValidationError::EmptyPackSizes)));
    assert_eq!(api.calls(), calls);
}

#[tokio::test]
async fn test_loading_cleared_on_every_path() {
    let (store, api) = loaded().await;

    api.fail_next(api_error(500));
    let _ = store.delete(1).await;
    assert!(!store.is_loading());

    let _ = store.delete(1).await;
    assert!(!store.is_loading());

    api.fail_next(api_error(401));
    store.load_default().await;
    assert!(!store.is_loading());
}

/// Run `op` with the fake service held mid-call and check the flag on both sides.
async fn loading_while_held<F, Fut, T>(
    store: &Arc<ConfigurationStore>,
    api: &Arc<FakeConfigurationApi>,
    op: F,
) -> T
where
    F: FnOnce(Arc<ConfigurationStore>) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let gate = api.hold_next();
    let calls = api.calls();
    let task = tokio::spawn(op(store.clone()));
    while api.calls() == calls {
        tokio::task::yield_now().await;
    }

    assert!(store.is_loading());
    gate.send(()).unwrap();
    let outcome = task.await.unwrap();
    assert!(!store.is_loading());
    outcome
}

async fn shared() -> (Arc<ConfigurationStore>, Arc<FakeConfigurationApi>) {
    let (store, api) = loaded().await;
    (Arc::new(store), api)
}

#[tokio::test]
async fn test_loading_raised_during_mutations() {
    let (store, api) = shared().await;

    let created = loading_while_held(&store, &api, |s| async move {
        s.create(CreatePackConfigurationRequest::new("Held", vec![7])).await
    })
    .await;
    let id = created.unwrap().id;

    let updated = loading_while_held(&store, &api, move |s| async move {
        s.update(id, UpdatePackConfigurationRequest::new("Held again", vec![8])).await
    })
    .await;
    assert_eq!(updated.unwrap().name, "Held again");

    let record = loading_while_held(&store, &api, move |s| async move { s.set_default(id).await })
        .await;
    assert!(record.unwrap().is_default);

    let deleted = loading_while_held(&store, &api, move |s| async move { s.delete(id).await }).await;
    assert!(deleted.is_ok());
    assert_eq!(store.configurations().len(), 3);
}

#[tokio::test]
async fn test_loading_raised_during_failed_mutations() {
    let (store, api) = shared().await;

    api.fail_next(api_error(500));
    let created = loading_while_held(&store, &api, |s| async move {
        s.create(CreatePackConfigurationRequest::new("Held", vec![7])).await
    })
    .await;
    assert_eq!(created.unwrap_err().status(), Some(500));

    api.fail_next(api_error(500));
    let updated = loading_while_held(&store, &api, |s| async move {
        s.update(2, UpdatePackConfigurationRequest::new("Bulk", vec![8])).await
    })
    .await;
    assert!(updated.is_err());

    api.fail_next(api_error(500));
    let record = loading_while_held(&store, &api, |s| async move { s.set_default(2).await }).await;
    assert!(record.is_err());

    api.fail_next(api_error(500));
    let deleted = loading_while_held(&store, &api, |s| async move { s.delete(2).await }).await;
    assert!(deleted.is_err());

    let state = store.snapshot();
    assert_eq!(state.configurations.len(), 3);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_loading_raised_during_load() {
    let (store, api) = shared().await;
    loading_while_held(&store, &api, |s| async move { s.load().await }).await;
    assert_eq!(store.error(), None);
}
