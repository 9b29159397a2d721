//! Norms REST API Server
//!
//! This binary serves the norms REST API over a Postgres-backed store.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! DATABASE_URL=postgresql://localhost/norms cargo run --bin norm_server --features server
//!
//! # Test endpoints
//! curl http://localhost:3000/api/v1/norms
//! curl http://localhost:3000/api/v1/norms/{guid}
//! curl http://localhost:3000/api/v1/norms/{guid}/eli
//! curl http://localhost:3000/api/health
//! ```

use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use norm_store::api::create_norm_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Norms REST API Server");

    // Get database URL from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost:5432/norms".to_string());

    println!("📊 Connecting to database: {}", database_url);

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    println!("✅ Database connection established");

    // Create router with CORS and tracing
    let app = create_norm_router(pool)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("\n🌐 Server running on http://{}", addr);
    println!("\n📖 Available endpoints:");
    println!("  GET    http://localhost:3000/api/v1/norms");
    println!("  GET    http://localhost:3000/api/v1/norms/:guid");
    println!("  GET    http://localhost:3000/api/v1/norms/:guid/eli");
    println!("  GET    http://localhost:3000/api/health");
    println!("\n✨ Press Ctrl+C to stop\n");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
