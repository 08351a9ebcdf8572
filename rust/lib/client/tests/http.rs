//! InventoryClient against live axum servers on loopback.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use qualicam_client::{ApiError, Chapa, ClientConfig, Endpoint, InventoryApi, InventoryClient, Retalho};

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> InventoryClient {
    let endpoint = Endpoint::parse(&addr.to_string()).unwrap();
    InventoryClient::new(ClientConfig::new(endpoint)).unwrap()
}

fn mdf(id: &str) -> Chapa {
    Chapa {
        id: id.into(),
        nome_material: "MDF Branco".into(),
        fornecedor: "Duratex".into(),
        tamanho: 2.75,
        preco: 189.9,
        localizacao: "Galpão A".into(),
    }
}

fn mdf_json(id: &str) -> Value {
    json!({
        "id": id,
        "nomeMaterial": "MDF Branco",
        "fornecedor": "Duratex",
        "tamanho": 2.75,
        "preco": 189.9,
        "localizacao": "Galpão A",
    })
}

#[tokio::test]
async fn get_chapa_not_found_is_none() {
    let app = Router::new().route(
        "/app/chapas/{id}",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "Chapa não encontrada"}))) }),
    );
    let client = client_for(serve(app).await);
    assert_eq!(client.get_chapa("12345").await.unwrap(), None);
}

#[tokio::test]
async fn get_chapa_found() {
    let app = Router::new().route(
        "/app/chapas/{id}",
        get(|Path(id): Path<String>| async move { Json(mdf_json(&id)) }),
    );
    let client = client_for(serve(app).await);
    let chapa = client.get_chapa("12345").await.unwrap().unwrap();
    assert_eq!(chapa, mdf("12345"));
}

#[tokio::test]
async fn get_chapa_server_error_is_not_absence() {
    let app = Router::new().route(
        "/app/chapas/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "db down"}))) }),
    );
    let client = client_for(serve(app).await);
    match client.get_chapa("12345").await {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_chapa_garbage_body_is_decode_error() {
    let app = Router::new().route("/app/chapas/{id}", get(|| async { "not json" }));
    let client = client_for(serve(app).await);
    assert!(matches!(client.get_chapa("12345").await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn create_chapa_error_carries_status() {
    let app = Router::new().route(
        "/app/chapas",
        axum::routing::post(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({"code": "ALREADY_EXISTS", "message": "chapa 12345 already exists"})),
            )
        }),
    );
    let client = client_for(serve(app).await);
    let err = client.create_chapa(&mdf("12345")).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(err.to_string().contains("409"));
}

#[tokio::test]
async fn create_chapa_sends_wire_names_and_echoes_on_message_body() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route(
            "/app/chapas",
            axum::routing::post(
                |State(seen): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                    *seen.lock().unwrap() = Some(body);
                    (StatusCode::CREATED, Json(json!({"message": "Chapa adicionada com sucesso!"})))
                },
            ),
        )
        .with_state(seen.clone());
    let client = client_for(serve(app).await);

    let created = client.create_chapa(&mdf("12345")).await.unwrap();
    assert_eq!(created, mdf("12345"));
    assert_eq!(seen.lock().unwrap().clone().unwrap(), mdf_json("12345"));
}

#[tokio::test]
async fn update_chapa_uses_path_id_and_decodes_record() {
    let app = Router::new().route(
        "/app/chapas/{id}",
        axum::routing::put(|Path(id): Path<String>, Json(mut body): Json<Value>| async move {
            body["id"] = json!(id);
            body["preco"] = json!(200.0);
            Json(body)
        }),
    );
    let client = client_for(serve(app).await);
    let updated = client.update_chapa("54321", &mdf("54321")).await.unwrap();
    assert_eq!(updated.id, "54321");
    assert_eq!(updated.preco, 200.0);
}

#[tokio::test]
async fn create_retalho_and_delete_chapa() {
    let app = Router::new()
        .route(
            "/app/retalhos",
            axum::routing::post(|Json(body): Json<Value>| async move { (StatusCode::CREATED, Json(body)) }),
        )
        .route(
            "/app/chapas/{id}",
            axum::routing::delete(|Path(id): Path<String>| async move {
                if id == "12345" {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        );
    let client = client_for(serve(app).await);

    let retalho = client.create_retalho(&Retalho::from(mdf("12345"))).await.unwrap();
    assert_eq!(retalho.id, "12345");
    client.delete_chapa("12345").await.unwrap();
    let err = client.delete_chapa("99999").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn lists_decode_arrays() {
    let app = Router::new()
        .route(
            "/app/chapas",
            get(|| async { Json(json!([mdf_json("00001"), mdf_json("00002")])) }),
        )
        .route("/app/retalhos", get(|| async { Json(json!([])) }));
    let client = client_for(serve(app).await);

    let chapas = client.list_chapas().await.unwrap();
    assert_eq!(chapas.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["00001", "00002"]);
    assert!(client.list_retalhos().await.unwrap().is_empty());
}

#[tokio::test]
async fn health_ok_and_failing() {
    let ok = Router::new().route("/app/health", get(|| async { Json(json!({"status": "ok"})) }));
    client_for(serve(ok).await).check_health().await.unwrap();

    let failing = Router::new().route("/app/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let err = client_for(serve(failing).await).check_health().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn slow_server_times_out() {
    let app = Router::new().route(
        "/app/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            "late"
        }),
    );
    let addr = serve(app).await;
    let endpoint = Endpoint::parse(&addr.to_string()).unwrap();
    let config = ClientConfig::new(endpoint).with_timeout(Duration::from_millis(200));
    let client = InventoryClient::new(config).unwrap();

    let err = client.check_health().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(d) if d == Duration::from_millis(200)), "{err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn closed_port_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).get_chapa("12345").await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let app = Router::new().route(
        "/qualicam/app/chapas/{id}",
        get(|Path(id): Path<String>| async move { Json(mdf_json(&id)) }),
    );
    let addr = serve(app).await;
    let endpoint = Endpoint::parse(&format!("http://{}/qualicam/", addr)).unwrap();
    let client = InventoryClient::new(ClientConfig::new(endpoint)).unwrap();
    assert!(client.get_chapa("00077").await.unwrap().is_some());
}
