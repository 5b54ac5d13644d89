//! Catalog records and request payloads.
//!
//! Wire field names are camelCase (`produtoId`, `dataCompra`, ...) to stay
//! compatible with existing clients of this API; database columns are
//! snake_case and match the struct field names for `FromRow`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub categoria_id: i32,
    pub nome: String,
    pub descricao: String,
}

/// Create/update payload. The client-supplied id is ignored on create (the
/// store assigns identifiers) and only checked against the path id on update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoriaInput {
    pub categoria_id: i32,
    pub nome: String,
    pub descricao: String,
}

/// A category with its owned products eagerly loaded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaComProdutos {
    #[serde(flatten)]
    pub categoria: Categoria,
    pub produtos: Vec<Produto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub produto_id: i32,
    pub nome: String,
    pub descricao: String,
    pub preco: Decimal,
    pub data_compra: Option<NaiveDateTime>,
    pub estoque: i32,
    pub imagem: String,
    pub categoria_id: i32,
}

/// Full-replace payload: PUT overwrites every mutable field, so absent body
/// fields fall back to their defaults (0, empty string, NULL date) rather
/// than preserving stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProdutoInput {
    pub produto_id: i32,
    pub nome: String,
    pub descricao: String,
    pub preco: Decimal,
    pub data_compra: Option<NaiveDateTime>,
    pub estoque: i32,
    pub imagem: String,
    pub categoria_id: i32,
}

/// Transient login credential; never persisted.
#[derive(Debug, Deserialize)]
pub struct UserModel {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenBody {
    pub token: String,
}
