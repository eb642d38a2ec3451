// tests/sync_remote.rs
//
// Sobe um "Apps Script" falso em memória (um axum na porta 0) e
// exercita o ciclo completo de sincronização contra ele.

use std::sync::{Arc, Mutex};

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use mantenimiento_backend::{
    db::LocalStore,
    models::organization::{Organization, Plan},
    services::sync_service::SyncService,
};

type Snapshot = Arc<Mutex<Option<Value>>>;

async fn receive_upload(State(snapshot): State<Snapshot>, body: String) -> Json<Value> {
    let envelope: Value = serde_json::from_str(&body).expect("corpo do SYNC_UP não era JSON");
    assert_eq!(envelope["action"], "SYNC_UP");
    assert!(envelope["orgId"].is_string());

    *snapshot.lock().unwrap() = Some(envelope["data"].clone());
    Json(json!({ "status": "success", "message": "Datos recibidos" }))
}

async fn serve_snapshot(State(snapshot): State<Snapshot>) -> Json<Value> {
    match snapshot.lock().unwrap().clone() {
        Some(data) => Json(json!({ "status": "success", "data": data })),
        None => Json(json!({ "status": "error", "message": "Sin datos en la nube" })),
    }
}

// Devolve a URL base do remoto falso.
async fn spawn_remote(snapshot: Snapshot) -> String {
    let app = Router::new()
        .route("/", post(receive_upload).get(serve_snapshot))
        .with_state(snapshot);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("servidor falso");
    });
    format!("http://{}/", addr)
}

fn open_store(dir: &tempfile::TempDir) -> LocalStore {
    LocalStore::open(&dir.path().join("sync-test.redb")).expect("abrir store")
}

fn register_org(store: &LocalStore, endpoint: Option<String>) -> Uuid {
    let org = Organization {
        id: Uuid::new_v4(),
        name: "Colegio de Prueba".to_string(),
        logo_url: None,
        plan: Plan::Free,
        remote_endpoint: endpoint,
    };
    store.upsert_organization(&org).expect("upsert org");
    org.id
}

#[tokio::test]
async fn round_trip_restaura_o_snapshot_local() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir);
    let snapshot: Snapshot = Arc::new(Mutex::new(None));
    let endpoint = spawn_remote(snapshot.clone()).await;

    let org_id = register_org(&store, Some(endpoint));
    let service = SyncService::new(store.clone()).expect("cliente http");

    // Fixa o seed no disco para poder comparar depois.
    let units = store.units(org_id).expect("units");
    store.save_units(org_id, &units).expect("save units");
    let campuses = store.campuses(org_id).expect("campuses");
    let tools = store.tools(org_id).expect("tools");
    store.save_tools(org_id, &tools).expect("save tools");
    let warehouse = store.warehouse(org_id).expect("warehouse");
    store.save_warehouse(org_id, &warehouse).expect("save wh");

    let up = service.sync_up(org_id).await;
    assert!(up.success, "sync_up falhou: {}", up.message);
    assert!(snapshot.lock().unwrap().is_some());

    // Simula perda local e restaura da nuvem.
    store.save_units(org_id, &[]).expect("wipe units");
    let down = service.sync_down(org_id).await;
    assert!(down.success, "sync_down falhou: {}", down.message);

    assert_eq!(store.units(org_id).expect("units"), units);
    assert_eq!(store.campuses(org_id).expect("campuses"), campuses);
    assert_eq!(store.tools(org_id).expect("tools"), tools);
    assert_eq!(store.warehouse(org_id).expect("warehouse"), warehouse);
}

#[tokio::test]
async fn sync_down_e_idempotente() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir);
    let snapshot: Snapshot = Arc::new(Mutex::new(None));
    let endpoint = spawn_remote(snapshot).await;
    let org_id = register_org(&store, Some(endpoint));
    let service = SyncService::new(store.clone()).expect("cliente http");

    let units = store.units(org_id).expect("units");
    store.save_units(org_id, &units).expect("save units");
    store
        .save_tools(org_id, &store.tools(org_id).expect("tools"))
        .expect("save tools");
    store
        .save_warehouse(org_id, &store.warehouse(org_id).expect("wh"))
        .expect("save wh");

    let up = service.sync_up(org_id).await;
    assert!(up.success, "{}", up.message);

    let first = service.sync_down(org_id).await;
    assert!(first.success, "{}", first.message);
    let after_first = store.units(org_id).expect("units");

    let second = service.sync_down(org_id).await;
    assert!(second.success, "{}", second.message);
    assert_eq!(store.units(org_id).expect("units"), after_first);
}

#[tokio::test]
async fn sem_endpoint_configurado_falha_com_mensagem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir);
    let org_id = register_org(&store, None);
    let service = SyncService::new(store).expect("cliente http");

    let outcome = service.sync_up(org_id).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "No se ha configurado la URL del API.");
}

#[tokio::test]
async fn endpoint_inalcancavel_vira_falha_com_mensagem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir);
    // Porta reservada e fechada: a conexão é recusada imediatamente.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let org_id = register_org(&store, Some(format!("http://{}/", addr)));
    let service = SyncService::new(store).expect("cliente http");

    let outcome = service.sync_up(org_id).await;
    assert!(!outcome.success);
    assert!(!outcome.message.is_empty());
    assert!(outcome.message.starts_with("Error de conexión"));
}

#[tokio::test]
async fn nuvem_sem_datos_reporta_o_erro_do_servidor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&dir);
    let endpoint = spawn_remote(Arc::new(Mutex::new(None))).await;
    let org_id = register_org(&store, Some(endpoint));
    let service = SyncService::new(store).expect("cliente http");

    // Sem SYNC_UP antes, o remoto responde status: "error".
    let outcome = service.sync_down(org_id).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Sin datos en la nube");
}
