//! Route table: login, categories, products, plus operational endpoints.

mod common;

use crate::handlers::{categorias, login, produtos};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login::login))
        .route(
            "/categorias",
            get(categorias::list).post(categorias::create),
        )
        .route(
            "/categorias/:id",
            get(categorias::get_by_id)
                .put(categorias::update)
                .delete(categorias::delete),
        )
        .route("/categoriaprodutos", get(categorias::list_with_products))
        .route(
            "/produtos",
            get(produtos::list).post(produtos::create).put(produtos::rename),
        )
        .route("/produtos/pagina", get(produtos::page))
        .route("/produtos/nome/:criterio", get(produtos::search))
        .route(
            "/produtos/:id",
            get(produtos::get_by_id)
                .put(produtos::replace)
                .delete(produtos::delete),
        )
        .route("/health", get(common::health))
        .route("/ready", get(common::ready))
        .route("/version", get(common::version))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::config::{AdminCredential, JwtConfig};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    // A lazily-connected pool never opens a socket for routes that do not
    // touch the store, so these tests run without a live database.
    fn test_state() -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/catalogo_test")
            .unwrap();
        AppState {
            pool,
            tokens: TokenService::new(&JwtConfig {
                key: "test-signing-key".into(),
                issuer: "catalogo-api".into(),
                audience: "catalogo-api".into(),
                lifetime_secs: 7200,
            }),
            admin: AdminCredential {
                username: "lvgvspe".into(),
                password: "lvgvspe".into(),
            },
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = app_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn version_reports_crate_name() {
        let app = app_router(test_state());
        let response = app
            .oneshot(Request::get("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "catalogo-api");
    }

    #[tokio::test]
    async fn login_with_configured_pair_returns_token() {
        let app = app_router(test_state());
        let response = app
            .oneshot(json_post(
                "/login",
                r#"{"username": "lvgvspe", "password": "lvgvspe"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_with_any_other_pair_is_400() {
        let app = app_router(test_state());
        let response = app
            .oneshot(json_post(
                "/login",
                r#"{"username": "lvgvspe", "password": "wrong"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Login inválido");
    }

    #[tokio::test]
    async fn login_without_body_is_400() {
        let app = app_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn category_list_without_token_is_401() {
        let app = app_router(test_state());
        let response = app
            .oneshot(Request::get("/categorias").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn category_list_with_garbage_token_is_401() {
        let app = app_router(test_state());
        let response = app
            .oneshot(
                Request::get("/categorias")
                    .header(header::AUTHORIZATION, "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn category_update_with_mismatched_ids_is_400() {
        // The id check runs before any store access.
        let app = app_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/categorias/7")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"categoriaId": 8, "nome": "Livros", "descricao": ""}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Ids não conferem");
    }

    #[tokio::test]
    async fn product_replace_with_mismatched_ids_is_400() {
        let app = app_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/produtos/3")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"produtoId": 4, "nome": "Caneta"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = app_router(test_state());
        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
