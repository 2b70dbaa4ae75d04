use std::sync::Arc;

use drivvo_rs::{
    ConfigEntry, DataKind, DrivvoClient, DrivvoConfig, Error, Hub, TokioHub, VehicleId,
    migrate_entry, setup_entry, unload_entry,
};
use serde_json::{Value, json};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

const LOGIN_PATH: &str = "/autenticacao/login_v2";

fn make_client(server: &MockServer) -> DrivvoClient<TokioHub> {
    let config = DrivvoConfig::new(format!("{}{}", server.uri(), LOGIN_PATH), server.uri());
    DrivvoClient::with_config(Arc::new(TokioHub::new()), config)
}

fn v1_entry() -> ConfigEntry {
    let data = json!({"email": "a@b.com", "password": "x", "id_vehicle": "5"});
    ConfigEntry::new("entry-1", 1, data.as_object().cloned().unwrap())
}

async fn mount_login(server: &MockServer, status: u16) {
    Mock::given(matchers::method("POST"))
        .and(matchers::path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"token": "T1"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_migrate_then_setup_then_unload() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    let client = make_client(&server);

    let mut entry = v1_entry();
    assert!(migrate_entry(&mut entry));
    assert_eq!(entry.version, 2);
    assert_eq!(entry.vehicles(), vec![VehicleId::new("5")]);

    assert!(setup_entry(&client, &entry).await.unwrap());
    let stored = client.hub().entry_data("entry-1").unwrap();
    assert_eq!(stored.get("vehicles"), Some(&json!(["5"])));

    assert!(unload_entry(client.hub().as_ref(), &entry));
    assert!(client.hub().entry_data("entry-1").is_none());
    assert!(!unload_entry(client.hub().as_ref(), &entry));
}

#[tokio::test]
async fn test_setup_rejected_credentials() {
    let server = MockServer::start().await;
    mount_login(&server, 401).await;
    let client = make_client(&server);

    let entry = ConfigEntry::from_parts("entry-2", "a@b.com", "wrong", &["5".into()]);
    let result = setup_entry(&client, &entry).await;

    assert!(matches!(result, Err(Error::AuthFailed(_))));
    assert!(client.hub().entry_data("entry-2").is_none());
}

#[tokio::test]
async fn test_setup_invalid_entry_skips_login() {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = make_client(&server);

    let mut entry = ConfigEntry::new("entry-3", 1, json!({"id_vehicle": 5}).as_object().cloned().unwrap());
    migrate_entry(&mut entry);
    assert_eq!(entry.data.get("email"), Some(&Value::Null));

    let result = setup_entry(&client, &entry).await;
    assert!(matches!(result, Err(Error::InvalidEntry(_))));
}

#[tokio::test]
async fn test_migrated_entry_drives_fetches() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/veiculo/5/abastecimento/web"))
        .and(matchers::header("x-token", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"data": "2023-01-01", "valor_total": 200.0},
            {"data": "2023-02-01", "valor_total": 180.0},
        ])))
        .mount(&server)
        .await;
    let client = make_client(&server);

    let mut entry = v1_entry();
    migrate_entry(&mut entry);
    let credentials = entry.credentials().unwrap();

    for vehicle in entry.vehicles() {
        let entries = client
            .get_vehicle_data(&credentials, &vehicle, DataKind::FuelLog)
            .await
            .and_then(|data| data.into_fuel_log())
            .unwrap();
        assert_eq!(entries[0].date.as_deref(), Some("2023-02-01"));
        assert_eq!(entries[1].date.as_deref(), Some("2023-01-01"));
    }

    // One login per fetch plus the GET itself
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}
