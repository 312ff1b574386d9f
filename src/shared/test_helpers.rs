use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::{ROLE_PLAYER, ROLE_SUPER_ADMIN};

use axum::{extract::Request, middleware::Next, Router};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub fn create_super_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: "test-admin-id".to_string(),
        sub: "test-admin-sub".to_string(),
        roles: vec![ROLE_SUPER_ADMIN.to_string()],
    }
}

pub fn create_player_user(account_id: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: account_id.to_string(),
        sub: format!("{}-sub", account_id),
        roles: vec![ROLE_PLAYER.to_string()],
    }
}

/// Wrap a router so every request carries `user`, standing in for `auth_middleware`
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

pub fn with_super_admin_auth(router: Router) -> Router {
    with_user(router, create_super_admin_user())
}

/// Single-connection in-memory SQLite pool with the schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

/// Assert that a response body is an error envelope and return its `error` string
pub fn assert_error_body(body: &serde_json::Value) -> &str {
    assert_eq!(body["success"], false);
    body["error"]
        .as_str()
        .expect("error responses must carry an `error` string")
}
