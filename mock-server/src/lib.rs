//! In-memory stand-in for the remote client service.
//!
//! Serves `/api/clients` with integer ids handed out sequentially. Every
//! `GET /api/clients/{id}` bumps a lookup counter so tests can assert how
//! many remote calls an enrichment pass issued.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClient {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Default)]
pub struct Registry {
    clients: RwLock<BTreeMap<i64, Client>>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
}

pub type Db = Arc<Registry>;

impl Registry {
    /// Build a registry pre-populated with `clients`. New ids continue after
    /// the largest seeded id.
    pub fn with_clients(clients: impl IntoIterator<Item = Client>) -> Db {
        let clients: BTreeMap<i64, Client> = clients.into_iter().map(|c| (c.id, c)).collect();
        let last_id = clients.keys().next_back().copied().unwrap_or(0);
        Arc::new(Registry {
            clients: RwLock::new(clients),
            next_id: AtomicI64::new(last_id),
            lookups: AtomicUsize::new(0),
        })
    }

    /// Number of single-client lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/{id}", get(get_client).delete(delete_client))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Db::default()).await
}

pub async fn serve(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_clients(State(db): State<Db>) -> Json<Vec<Client>> {
    let clients = db.clients.read().await;
    Json(clients.values().cloned().collect())
}

async fn create_client(
    State(db): State<Db>,
    Json(input): Json<CreateClient>,
) -> (StatusCode, Json<Client>) {
    let client = Client {
        id: db.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        name: input.name,
        email: input.email,
    };
    db.clients.write().await.insert(client.id, client.clone());
    tracing::debug!(id = client.id, "client created");
    (StatusCode::CREATED, Json(client))
}

async fn get_client(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Client>, StatusCode> {
    db.lookups.fetch_add(1, Ordering::SeqCst);
    let clients = db.clients.read().await;
    clients.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_client(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut clients = db.clients.write().await;
    match clients.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_serializes_without_missing_email() {
        let client = Client {
            id: 1,
            name: "Test".to_string(),
            email: None,
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Test");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn create_client_email_is_optional() {
        let input: CreateClient = serde_json::from_str(r#"{"name":"No email"}"#).unwrap();
        assert_eq!(input.name, "No email");
        assert!(input.email.is_none());
    }

    #[test]
    fn create_client_rejects_missing_name() {
        let result: Result<CreateClient, _> = serde_json::from_str(r#"{"email":"a@b.c"}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn seeded_registry_continues_after_largest_id() {
        let db = Registry::with_clients([
            Client { id: 3, name: "C".to_string(), email: None },
            Client { id: 10, name: "J".to_string(), email: None },
        ]);
        assert_eq!(db.next_id.load(Ordering::SeqCst), 10);
        assert_eq!(db.clients.read().await.len(), 2);
        assert_eq!(db.lookups(), 0);
    }
}
