//! Category endpoints.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{Categoria, CategoriaComProdutos, CategoriaInput};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CategoriaInput>,
) -> Result<impl IntoResponse, ApiError> {
    let categoria = CatalogService::create_categoria(&state.pool, &input).await?;
    let location = format!("/categorias/{}", categoria.categoria_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(categoria),
    ))
}

/// The only authorization-gated endpoint in this group.
pub async fn list(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Categoria>>, ApiError> {
    Ok(Json(CatalogService::list_categorias(&state.pool).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Categoria>, ApiError> {
    let categoria = CatalogService::get_categoria(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Categoria não encontrada".into()))?;
    Ok(Json(categoria))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoriaInput>,
) -> Result<Json<Categoria>, ApiError> {
    if input.categoria_id != id {
        return Err(ApiError::BadRequest("Ids não conferem".into()));
    }
    let categoria = CatalogService::update_categoria(&state.pool, id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Categoria não encontrada".into()))?;
    Ok(Json(categoria))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if !CatalogService::delete_categoria(&state.pool, id).await? {
        return Err(ApiError::NotFound("Categoria não encontrada".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_with_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoriaComProdutos>>, ApiError> {
    Ok(Json(
        CatalogService::list_categorias_com_produtos(&state.pool).await?,
    ))
}
