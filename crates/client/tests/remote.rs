mod common;

use axum::http::StatusCode;

use client::{ClientError, EntityKind, Identity, RemoteDataClient};

#[tokio::test]
async fn login_returns_identity() {
    let (base_url, remote) = common::spawn(common::seeded()).await;
    let client = RemoteDataClient::new(&base_url).unwrap();

    let identity = client.login("alice", common::PASSWORD).await.unwrap();

    assert_eq!(identity, Identity::new(1, "alice"));
    assert_eq!(remote.lock().unwrap().seen_users, vec![None]);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (base_url, _remote) = common::spawn(common::seeded()).await;
    let client = RemoteDataClient::new(&base_url).unwrap();

    let err = client.login("alice", "nope").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid username or password");
}

#[tokio::test]
async fn register_reports_new_user_id() {
    let (base_url, _remote) = common::spawn(common::Remote::default()).await;
    let client = RemoteDataClient::new(&base_url).unwrap();

    assert_eq!(client.register("bob", "pw").await.unwrap(), 2);

    let err = client.register("taken", "pw").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    assert_eq!(err.to_string(), "Username already exists");
}

#[tokio::test]
async fn fetch_all_converts_amounts_to_cents() {
    let (base_url, _remote) = common::spawn(common::seeded()).await;
    let client = RemoteDataClient::new(&base_url).unwrap();

    let snapshot = client.fetch_all(&Identity::new(1, "alice")).await.unwrap();

    assert_eq!(snapshot.transactions[0].amount.cents(), 100_000);
    assert_eq!(snapshot.goals[0].current_savings.cents(), 50_000);
    assert_eq!(snapshot.category_label("1-c5"), "Salary");
}

#[tokio::test]
async fn delete_addresses_member_path() {
    let (base_url, remote) = common::spawn(common::seeded()).await;
    let client = RemoteDataClient::new(&base_url).unwrap();
    let identity = Identity::new(1, "alice");

    client
        .delete(&identity, EntityKind::Category, "1-c2")
        .await
        .unwrap();

    assert_eq!(remote.lock().unwrap().categories.len(), 2);
    assert!(matches!(
        client.delete(&identity, EntityKind::Category, "1-c2").await,
        Err(ClientError::Remote { status, .. }) if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = RemoteDataClient::new(&format!("http://{addr}")).unwrap();

    let err = client
        .fetch_all(&Identity::new(1, "alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.status(), None);
}
