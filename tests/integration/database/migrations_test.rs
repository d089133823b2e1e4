//! Migration and persistence tests against a file-backed database

use minilink::backend::auth::{CredentialStore, TokenService};
use minilink::backend::server::database::{connect, connect_and_migrate};
use minilink::backend::server::AppState;

use crate::common::*;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("minilink.db").display());

    let pool = connect_and_migrate(&url).await.expect("first migrate");
    pool.close().await;

    let pool = connect_and_migrate(&url).await.expect("second migrate");
    assert_eq!(count_rows(&pool, "users").await, 0);
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("minilink.db").display());

    let pool = connect_and_migrate(&url).await.expect("migrate");
    let store = CredentialStore::new(pool.clone(), 4).await.expect("store");
    let user = store
        .register("Alice", "alice@x.com", "secret1")
        .await
        .expect("register");
    pool.close().await;

    let pool = connect(&url).await.expect("reconnect");
    let store = CredentialStore::new(pool.clone(), 4).await.expect("store");
    let verified = store.verify("alice@x.com", "secret1").await.expect("verify");
    assert_eq!(verified.id, user.id);
}

#[tokio::test]
async fn test_tokens_survive_restart_with_same_secret() {
    let dir = tempfile::tempdir().expect("tempdir");
    let upload_dir = tempfile::tempdir().expect("upload dir");
    let url = format!("sqlite://{}", dir.path().join("minilink.db").display());

    let config = test_config(&upload_dir).database_url(url.clone()).build().expect("config");
    let state = AppState::initialize(config).await.expect("state");
    let user = state
        .credentials
        .register("Alice", "alice@x.com", "secret1")
        .await
        .expect("register");
    let token = state.tokens.issue(user.id).expect("token");
    state.shutdown().await;

    let config = test_config(&upload_dir).database_url(url).build().expect("config");
    let tokens = TokenService::from_config(&config);
    assert_eq!(tokens.verify(&token).expect("verify"), user.id);
}
