use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use klaksvik::application::ports::TextRepair;
use klaksvik::application::services::{AnalysisService, ExtractionService};
use klaksvik::infrastructure::drive::GoogleDriveAdapter;
use klaksvik::infrastructure::observability::{TracingConfig, init_tracing};
use klaksvik::infrastructure::records::AirtableAdapter;
use klaksvik::infrastructure::security::AuthGuard;
use klaksvik::infrastructure::text_processing::{MirroredHebrewRepair, PdfTextAdapter};
use klaksvik::infrastructure::vision::GoogleVisionAdapter;
use klaksvik::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(&environment)
        .map_err(|e| anyhow::anyhow!("failed to load settings: {e}"))?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let document_text = Arc::new(PdfTextAdapter::new());
    let repair: Arc<dyn TextRepair> = Arc::new(MirroredHebrewRepair::new());
    let vision = Arc::new(GoogleVisionAdapter::new(
        &settings.vision.base_url,
        &settings.vision.api_key,
    ));
    let extraction = Arc::new(ExtractionService::new(document_text, vision, repair));

    let drive = Arc::new(GoogleDriveAdapter::new(
        &settings.drive.base_url,
        &settings.drive.access_token,
    ));
    let records = Arc::new(AirtableAdapter::new(
        &settings.records.base_url,
        &settings.records.api_key,
        &settings.records.base_id,
        &settings.records.table_name,
    ));

    let analysis_service = Arc::new(AnalysisService::new(
        extraction,
        drive,
        records,
        settings.records.schema.clone().into(),
    ));

    let guard: AuthGuard = settings.auth.clone().into();
    tracing::info!(
        bearer_auth = guard.bearer_token.is_some(),
        webhook_signature = guard.webhook_secret.is_some(),
        "request authorization configured"
    );

    let state = AppState { analysis_service };
    let router = create_router(state, Arc::new(guard));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
