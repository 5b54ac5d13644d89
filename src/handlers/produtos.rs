//! Product endpoints.
//!
//! Two quirks of the original surface are kept for client compatibility:
//! delete answers 200 with the removed record (not 204), and rename and
//! pagination take query-string parameters while the rest use path segments.

use crate::error::ApiError;
use crate::models::{Produto, ProdutoInput};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameParams {
    pub produto_id: i32,
    pub produto_nome: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub numero_pagina: i64,
    pub tamanho_pagina: i64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProdutoInput>,
) -> Result<impl IntoResponse, ApiError> {
    let produto = CatalogService::create_produto(&state.pool, &input).await?;
    let location = format!("/produtos/{}", produto.produto_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(produto),
    ))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Produto>>, ApiError> {
    Ok(Json(CatalogService::list_produtos(&state.pool).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Produto>, ApiError> {
    let produto = CatalogService::get_produto(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado".into()))?;
    Ok(Json(produto))
}

/// `PUT /produtos?produtoId&produtoNome`: mutates only the name.
pub async fn rename(
    State(state): State<AppState>,
    Query(params): Query<RenameParams>,
) -> Result<Json<Produto>, ApiError> {
    let produto = CatalogService::rename_produto(&state.pool, params.produto_id, &params.produto_nome)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado".into()))?;
    Ok(Json(produto))
}

/// Full replace, not a patch: absent body fields reset to their defaults.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProdutoInput>,
) -> Result<Json<Produto>, ApiError> {
    if input.produto_id != id {
        return Err(ApiError::BadRequest("Ids não conferem".into()));
    }
    let produto = CatalogService::replace_produto(&state.pool, id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado".into()))?;
    Ok(Json(produto))
}

/// Answers 200 with the deleted record, unlike category delete's 204.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Produto>, ApiError> {
    let produto = CatalogService::delete_produto(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado".into()))?;
    Ok(Json(produto))
}

/// Case-insensitive substring search; no match answers 404 with a literal
/// empty list rather than an error body.
pub async fn search(
    State(state): State<AppState>,
    Path(criterio): Path<String>,
) -> Result<Response, ApiError> {
    let produtos = CatalogService::search_produtos(&state.pool, &criterio).await?;
    if produtos.is_empty() {
        return Ok((StatusCode::NOT_FOUND, Json(produtos)).into_response());
    }
    Ok(Json(produtos).into_response())
}

pub async fn page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Produto>>, ApiError> {
    Ok(Json(
        CatalogService::page_produtos(&state.pool, params.numero_pagina, params.tamanho_pagina)
            .await?,
    ))
}
