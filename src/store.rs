//! Database bootstrap: create the database and catalog tables if missing.

use crate::error::ApiError;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Create the database named in the URL if it does not exist yet. Connects to
/// the maintenance `postgres` database on the same server to check.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), ApiError> {
    let (admin_url, db_name) = split_db_name(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ApiError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create the catalog tables if missing. Identifiers are store-assigned; the
/// product foreign key and its cascade live here, not in the handlers.
pub async fn ensure_catalog_tables(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categorias (
            categoria_id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            nome TEXT NOT NULL DEFAULT '',
            descricao TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS produtos (
            produto_id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            nome TEXT NOT NULL DEFAULT '',
            descricao TEXT NOT NULL DEFAULT '',
            preco NUMERIC(12, 2) NOT NULL DEFAULT 0,
            data_compra TIMESTAMP,
            estoque INT NOT NULL DEFAULT 0,
            imagem TEXT NOT NULL DEFAULT '',
            categoria_id INT NOT NULL
                REFERENCES categorias (categoria_id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn split_db_name(url: &str) -> Result<(String, String), ApiError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ApiError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = split_db_name("postgres://u:p@localhost:5432/catalogo").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "catalogo");
    }

    #[test]
    fn strips_query_string() {
        let (_, name) = split_db_name("postgres://localhost/catalogo?sslmode=disable").unwrap();
        assert_eq!(name, "catalogo");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("catalogo"), "\"catalogo\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
