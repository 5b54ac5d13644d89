//! Catalog reads and writes against PostgreSQL.
//!
//! Every function takes the pool and returns domain results; status-code
//! mapping happens in the handlers. Absent rows come back as `None`, never as
//! an error, so callers decide between 404-with-message and bare 404.

use crate::error::ApiError;
use crate::models::{Categoria, CategoriaComProdutos, CategoriaInput, Produto, ProdutoInput};
use sqlx::PgPool;

pub struct CatalogService;

impl CatalogService {
    /// Insert a category. Any client-supplied id is ignored; the store assigns one.
    pub async fn create_categoria(
        pool: &PgPool,
        input: &CategoriaInput,
    ) -> Result<Categoria, ApiError> {
        let row = sqlx::query_as::<_, Categoria>(
            "INSERT INTO categorias (nome, descricao) VALUES ($1, $2) RETURNING *",
        )
        .bind(&input.nome)
        .bind(&input.descricao)
        .fetch_one(pool)
        .await?;
        tracing::debug!(categoria_id = row.categoria_id, "categoria created");
        Ok(row)
    }

    pub async fn list_categorias(pool: &PgPool) -> Result<Vec<Categoria>, ApiError> {
        Ok(sqlx::query_as::<_, Categoria>("SELECT * FROM categorias")
            .fetch_all(pool)
            .await?)
    }

    pub async fn get_categoria(pool: &PgPool, id: i32) -> Result<Option<Categoria>, ApiError> {
        Ok(
            sqlx::query_as::<_, Categoria>("SELECT * FROM categorias WHERE categoria_id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?,
        )
    }

    /// Overwrite name and description only; other fields are untouched.
    pub async fn update_categoria(
        pool: &PgPool,
        id: i32,
        input: &CategoriaInput,
    ) -> Result<Option<Categoria>, ApiError> {
        Ok(sqlx::query_as::<_, Categoria>(
            "UPDATE categorias SET nome = $2, descricao = $3 WHERE categoria_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.nome)
        .bind(&input.descricao)
        .fetch_optional(pool)
        .await?)
    }

    /// Returns false when no row existed. Owned products are removed by the
    /// store's cascade, not here.
    pub async fn delete_categoria(pool: &PgPool, id: i32) -> Result<bool, ApiError> {
        let deleted = sqlx::query_scalar::<_, i32>(
            "DELETE FROM categorias WHERE categoria_id = $1 RETURNING categoria_id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(deleted.is_some())
    }

    /// All categories with owned products eagerly loaded, products ordered by
    /// id ascending. Two queries, grouped in memory.
    pub async fn list_categorias_com_produtos(
        pool: &PgPool,
    ) -> Result<Vec<CategoriaComProdutos>, ApiError> {
        let categorias = sqlx::query_as::<_, Categoria>(
            "SELECT * FROM categorias ORDER BY categoria_id",
        )
        .fetch_all(pool)
        .await?;
        let produtos =
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos ORDER BY produto_id")
                .fetch_all(pool)
                .await?;

        let mut nested: Vec<CategoriaComProdutos> = categorias
            .into_iter()
            .map(|categoria| CategoriaComProdutos {
                categoria,
                produtos: Vec::new(),
            })
            .collect();
        for produto in produtos {
            if let Some(entry) = nested
                .iter_mut()
                .find(|n| n.categoria.categoria_id == produto.categoria_id)
            {
                entry.produtos.push(produto);
            }
        }
        Ok(nested)
    }

    pub async fn create_produto(
        pool: &PgPool,
        input: &ProdutoInput,
    ) -> Result<Produto, ApiError> {
        let row = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (nome, descricao, preco, data_compra, estoque, imagem, categoria_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.nome)
        .bind(&input.descricao)
        .bind(input.preco)
        .bind(input.data_compra)
        .bind(input.estoque)
        .bind(&input.imagem)
        .bind(input.categoria_id)
        .fetch_one(pool)
        .await?;
        tracing::debug!(produto_id = row.produto_id, "produto created");
        Ok(row)
    }

    pub async fn list_produtos(pool: &PgPool) -> Result<Vec<Produto>, ApiError> {
        Ok(sqlx::query_as::<_, Produto>("SELECT * FROM produtos")
            .fetch_all(pool)
            .await?)
    }

    pub async fn get_produto(pool: &PgPool, id: i32) -> Result<Option<Produto>, ApiError> {
        Ok(
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE produto_id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?,
        )
    }

    /// Mutate only the name of the identified product.
    pub async fn rename_produto(
        pool: &PgPool,
        id: i32,
        nome: &str,
    ) -> Result<Option<Produto>, ApiError> {
        Ok(sqlx::query_as::<_, Produto>(
            "UPDATE produtos SET nome = $2 WHERE produto_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .fetch_optional(pool)
        .await?)
    }

    /// Full replace: every mutable field is overwritten from the input.
    pub async fn replace_produto(
        pool: &PgPool,
        id: i32,
        input: &ProdutoInput,
    ) -> Result<Option<Produto>, ApiError> {
        Ok(sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos
            SET nome = $2, descricao = $3, preco = $4, data_compra = $5,
                estoque = $6, imagem = $7, categoria_id = $8
            WHERE produto_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(&input.descricao)
        .bind(input.preco)
        .bind(input.data_compra)
        .bind(input.estoque)
        .bind(&input.imagem)
        .bind(input.categoria_id)
        .fetch_optional(pool)
        .await?)
    }

    /// Remove and return the deleted row, or `None` if absent.
    pub async fn delete_produto(pool: &PgPool, id: i32) -> Result<Option<Produto>, ApiError> {
        Ok(sqlx::query_as::<_, Produto>(
            "DELETE FROM produtos WHERE produto_id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?)
    }

    /// Case-insensitive substring match on the product name. Wildcards in the
    /// criterion are escaped so it is matched literally.
    pub async fn search_produtos(
        pool: &PgPool,
        criterio: &str,
    ) -> Result<Vec<Produto>, ApiError> {
        let pattern = format!("%{}%", escape_like(criterio));
        Ok(
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE nome ILIKE $1")
                .bind(pattern)
                .fetch_all(pool)
                .await?,
        )
    }

    /// Page through products ordered by id ascending. Page numbers are 1-based
    /// and unvalidated; inputs are clamped only as far as needed to keep the
    /// SQL well-formed.
    pub async fn page_produtos(
        pool: &PgPool,
        numero_pagina: i64,
        tamanho_pagina: i64,
    ) -> Result<Vec<Produto>, ApiError> {
        Ok(sqlx::query_as::<_, Produto>(
            "SELECT * FROM produtos ORDER BY produto_id LIMIT $1 OFFSET $2",
        )
        .bind(tamanho_pagina.max(0))
        .bind(page_to_offset(numero_pagina, tamanho_pagina))
        .fetch_all(pool)
        .await?)
    }
}

fn page_to_offset(numero_pagina: i64, tamanho_pagina: i64) -> i64 {
    (numero_pagina - 1).max(0) * tamanho_pagina.max(0)
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
