use std::sync::Arc;

use emporium_store::{InMemoryStore, PostgresStore, ReviewStore};

#[tokio::main]
async fn main() {
    emporium_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let store: Arc<dyn ReviewStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => Arc::new(
            PostgresStore::connect(&url)
                .await
                .expect("failed to connect to postgres"),
        ),
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let app = emporium_api::app::build_app(jwt_secret, store);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
