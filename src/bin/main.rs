use grade_service::state::AppState;
use grade_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    tracing::info!("Connecting to database...");
    let db = sea_orm::Database::connect(&APP_CONFIG.database_url).await?;

    let app = app::create_app(AppState::new(db)).await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
