mod db;
mod routes;
mod services;
mod state;
mod validate;

use std::path::PathBuf;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let media_dir = std::env::var("MEDIA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./media"));
    let media = services::storage::MediaStore::new(media_dir);

    // The bootstrap admin: a sign-up with this email gets the admin flag.
    let admin_email = std::env::var("ADMIN_EMAIL").ok();
    if admin_email.is_none() {
        tracing::warn!("ADMIN_EMAIL not set; no account can reach the admin panel");
    }

    let state = state::AppState::new(pool, media, admin_email);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "cybervision server listening");
    axum::serve(listener, app).await.expect("server failed");
}
