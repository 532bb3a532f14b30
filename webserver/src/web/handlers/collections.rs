//! CRUD handlers shared by the four collections
//!
//! Each handler is generic over the record kind, so `/api/subjects` and
//! `/api/lessons` run the same code with different `R`.

use axum::{extract::State, http::StatusCode, response::Json};

use engine::{MutableRecord, Outcome, StoreGateway};
use shared::{EntityRecord, Record};

use super::unexpected;
use crate::error::WebServerResult;
use crate::types::DeleteResponse;
use crate::web::{ApiJson, ApiPath};
use crate::webserver_impl::WebServer;

/// GET /api/{collection}
pub async fn list<G, R>(State(server): State<WebServer<G>>) -> Json<Vec<R>>
where
    G: StoreGateway + 'static,
    R: MutableRecord,
{
    let records = server
        .engine()
        .read(|store| R::collection(store.snapshot()).to_vec())
        .await;
    Json(records)
}

/// GET /api/{collection}/{id}
pub async fn get_one<G, R>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<R::Id>,
) -> WebServerResult<Json<R>>
where
    G: StoreGateway + 'static,
    R: MutableRecord,
{
    let record = server
        .engine()
        .read(|store| store.require::<R>(id).cloned())
        .await?;
    Ok(Json(record))
}

/// POST /api/{collection}
pub async fn create<G, R>(
    State(server): State<WebServer<G>>,
    ApiJson(draft): ApiJson<R::Draft>,
) -> WebServerResult<(StatusCode, Json<EntityRecord>)>
where
    G: StoreGateway + 'static,
    R: MutableRecord,
{
    match server.engine().commit(R::create_mutation(draft)).await? {
        Outcome::Created(record) => Ok((StatusCode::CREATED, Json(record))),
        other => Err(unexpected(other)),
    }
}

/// PUT /api/{collection}/{id}
pub async fn update<G, R>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<R::Id>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> WebServerResult<Json<EntityRecord>>
where
    G: StoreGateway + 'static,
    R: MutableRecord,
{
    match server.engine().commit(R::update_mutation(id, patch)).await? {
        Outcome::Updated(record) => Ok(Json(record)),
        other => Err(unexpected(other)),
    }
}

/// DELETE /api/{collection}/{id}
pub async fn delete<G, R>(
    State(server): State<WebServer<G>>,
    ApiPath(id): ApiPath<R::Id>,
) -> WebServerResult<Json<DeleteResponse>>
where
    G: StoreGateway + 'static,
    R: MutableRecord,
{
    match server.engine().commit(R::delete_mutation(id)).await? {
        Outcome::Deleted(removed) => Ok(Json(DeleteResponse {
            success: true,
            removed,
        })),
        other => Err(unexpected(other)),
    }
}
