use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use inventario_core::{ItemId, VenueId};
use inventario_infra::{InventoryStore, PostgrestStore, StoreConfig, StoreError};
use inventario_inventory::{Condition, NewItem, Quantity, Section, VenueStatus};

#[derive(Debug, Clone)]
struct Seen {
    method: &'static str,
    path: &'static str,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Mock {
    seen: Arc<Mutex<Vec<Seen>>>,
    venue_id: Arc<Mutex<Option<VenueId>>>,
}

impl Mock {
    fn record(&self, seen: Seen) {
        self.seen.lock().unwrap().push(seen);
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

fn venue_row(id: VenueId, name: &str, status: &str) -> Value {
    json!({
        "id": id.to_string(),
        "nombre": name,
        "comuna": "Comuna 8",
        "barrio": "La Base",
        "direccion": "Cra 8",
        "entidad_administra": "JAC",
        "administrador": "Marta",
        "celular": "300",
        "email": "a@b.co",
        "georeferenciacion": "https://maps.google.com/maps?q=1,2",
        "susceptible_administracion": "Si",
        "estado": status,
        "created_at": "2024-02-01T10:00:00+00:00",
    })
}

async fn venues_get(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    mock.record(Seen {
        method: "GET",
        path: "escenarios",
        query: query.clone(),
        headers: headers.clone(),
        body: None,
    });
    let known = *mock.venue_id.lock().unwrap();

    if let Some(filter) = query.get("nombre") {
        return match known {
            Some(id) if filter == "ilike.cancha x" => {
                (StatusCode::OK, Json(json!([venue_row(id, "Cancha X", "pendiente")])))
            }
            _ => (StatusCode::OK, Json(json!([]))),
        };
    }

    if let Some(filter) = query.get("id") {
        return match known {
            Some(id) if *filter == format!("eq.{id}") => {
                (StatusCode::OK, Json(venue_row(id, "Cancha X", "pendiente")))
            }
            _ => (
                StatusCode::NOT_ACCEPTABLE,
                Json(json!({
                    "code": "PGRST116",
                    "message": "JSON object requested, multiple (or no) rows returned",
                    "details": "The result contains 0 rows",
                    "hint": null,
                })),
            ),
        };
    }

    let id = known.unwrap_or_default();
    if query.get("select").map(String::as_str) == Some("*,items(*)") {
        let mut row = venue_row(id, "Cancha X", "pendiente");
        row["items"] = json!([{
            "id": 1,
            "escenario_id": id.to_string(),
            "seccion": "Inmuebles",
            "nombre": "Graderías",
            "cantidad": 2
        }]);
        return (StatusCode::OK, Json(json!([row])));
    }
    (StatusCode::OK, Json(json!([venue_row(id, "Cancha X", "pendiente")])))
}

async fn venues_patch(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    mock.record(Seen {
        method: "PATCH",
        path: "escenarios",
        query,
        headers,
        body: Some(body.clone()),
    });
    let id = mock.venue_id.lock().unwrap().unwrap_or_default();
    let status = body["estado"].as_str().unwrap_or("pendiente").to_string();
    Json(json!([venue_row(id, "Cancha X", &status)]))
}

async fn items_post(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    mock.record(Seen {
        method: "POST",
        path: "items",
        query: HashMap::new(),
        headers,
        body: Some(body.clone()),
    });
    let mut row = body[0].clone();
    row["id"] = json!(77);
    (StatusCode::CREATED, Json(json!([row])))
}

async fn items_delete(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    mock.record(Seen {
        method: "DELETE",
        path: "items",
        query,
        headers,
        body: None,
    });
    Json(json!([]))
}

async fn items_insert_conflict(State(mock): State<Mock>, headers: HeaderMap) -> impl IntoResponse {
    mock.record(Seen {
        method: "POST",
        path: "items_disponibles",
        query: HashMap::new(),
        headers,
        body: None,
    });
    (
        StatusCode::CONFLICT,
        Json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint",
            "details": null,
            "hint": null,
        })),
    )
}

async fn ensure_catalog(State(mock): State<Mock>, headers: HeaderMap) -> StatusCode {
    mock.record(Seen {
        method: "POST",
        path: "rpc",
        query: HashMap::new(),
        headers,
        body: None,
    });
    StatusCode::NO_CONTENT
}

struct MockServer {
    mock: Mock,
    store: PostgrestStore,
    handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    async fn spawn() -> Self {
        let mock = Mock::default();
        let app = Router::new()
            .route("/rest/v1/escenarios", get(venues_get).patch(venues_patch))
            .route("/rest/v1/items", post(items_post).delete(items_delete))
            .route("/rest/v1/items_disponibles", post(items_insert_conflict))
            .route(
                "/rest/v1/rpc/create_items_disponibles_if_not_exists",
                post(ensure_catalog),
            )
            .with_state(mock.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = StoreConfig::new(&format!("http://{addr}"), "anon-key").unwrap();
        let store = PostgrestStore::new(&config).unwrap();
        Self { mock, store, handle }
    }

    fn know_venue(&self) -> VenueId {
        let id = VenueId::new();
        *self.mock.venue_id.lock().unwrap() = Some(id);
        id
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn every_request_carries_the_access_key() {
    let srv = MockServer::spawn().await;
    srv.store.list_venues().await.unwrap();

    let seen = srv.mock.last();
    assert_eq!(seen.headers["apikey"], "anon-key");
    assert_eq!(seen.headers["authorization"], "Bearer anon-key");
    assert_eq!(seen.query["order"], "id.desc");
}

#[tokio::test]
async fn missing_single_row_is_reported_as_no_rows() {
    let srv = MockServer::spawn().await;
    let err = srv.store.get_venue(VenueId::new()).await.unwrap_err();
    assert_eq!(err, StoreError::NoRows);
    assert_eq!(
        srv.mock.last().headers["accept"],
        "application/vnd.pgrst.object+json"
    );
}

#[tokio::test]
async fn single_row_read_decodes_the_object() {
    let srv = MockServer::spawn().await;
    let id = srv.know_venue();
    let venue = srv.store.get_venue(id).await.unwrap();
    assert_eq!(venue.id, id);
    assert_eq!(venue.details.name, "Cancha X");
}

#[tokio::test]
async fn name_lookup_uses_escaped_case_insensitive_filter() {
    let srv = MockServer::spawn().await;
    let id = srv.know_venue();

    let found = srv.store.find_venue_by_name("cancha x").await.unwrap();
    assert_eq!(found.id, id);
    assert_eq!(srv.mock.last().query["limit"], "1");

    let err = srv.store.find_venue_by_name("50%_off").await.unwrap_err();
    assert!(err.is_no_rows());
    assert_eq!(srv.mock.last().query["nombre"], "ilike.50\\%\\_off");
}

#[tokio::test]
async fn star_in_name_is_not_sent_as_a_wildcard() {
    let srv = MockServer::spawn().await;
    srv.know_venue();

    let err = srv.store.find_venue_by_name("cancha*").await.unwrap_err();
    assert!(err.is_no_rows());
    assert_eq!(srv.mock.last().query["nombre"], "imatch.^cancha\\*$");
}

#[tokio::test]
async fn status_update_patches_only_the_status() {
    let srv = MockServer::spawn().await;
    let id = srv.know_venue();

    let venue = srv
        .store
        .set_venue_status(id, VenueStatus::Completed)
        .await
        .unwrap();
    assert_eq!(venue.status, VenueStatus::Completed);

    let seen = srv.mock.last();
    assert_eq!(seen.method, "PATCH");
    assert_eq!(seen.query["id"], format!("eq.{id}"));
    assert_eq!(seen.body.unwrap(), json!({ "estado": "completado" }));
    assert_eq!(seen.headers["prefer"], "return=representation");
}

#[tokio::test]
async fn item_insert_sends_array_and_returns_rows() {
    let srv = MockServer::spawn().await;
    let venue_id = VenueId::new();
    let rows = srv
        .store
        .insert_item(&NewItem {
            venue_id,
            section: Section::Muebles,
            name: "Silla".into(),
            quantity: Quantity::new(5).unwrap(),
            condition: Condition::Bueno,
        })
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ItemId::new(77));
    assert_eq!(rows[0].condition, Some(Condition::Bueno));

    let body = srv.mock.last().body.unwrap();
    assert_eq!(
        body,
        json!([{
            "escenario_id": venue_id.to_string(),
            "seccion": "Muebles",
            "nombre": "Silla",
            "cantidad": 5,
            "estado": "Bueno",
        }])
    );
}

#[tokio::test]
async fn deleting_nothing_is_no_rows() {
    let srv = MockServer::spawn().await;
    let err = srv.store.delete_item(ItemId::new(404)).await.unwrap_err();
    assert!(err.is_no_rows());
    assert_eq!(srv.mock.last().query["id"], "eq.404");
}

#[tokio::test]
async fn integrity_errors_map_to_constraint() {
    let srv = MockServer::spawn().await;
    let err = srv
        .store
        .insert_available_name(&inventario_inventory::AvailableItemName::new(
            "Sillas",
            Section::Muebles,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
}

#[tokio::test]
async fn embedded_select_returns_items_per_venue() {
    let srv = MockServer::spawn().await;
    srv.know_venue();
    let rows = srv.store.list_venues_with_items().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].items.len(), 1);
    assert_eq!(rows[0].items[0].condition, None);
}

#[tokio::test]
async fn catalog_rpc_accepts_empty_response() {
    let srv = MockServer::spawn().await;
    srv.store.ensure_catalog().await.unwrap();
    assert_eq!(srv.mock.last().path, "rpc");
}
