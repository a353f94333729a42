use std::sync::Arc;

use aws_config::SdkConfig;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use freyja_ai::{BedrockGenerator, ContentGenerator, SimulatedGenerator};
use freyja_publish::{Publisher, SimulatedPublisher, TwitterPublisher};
use freyja_queue::{sweep, ApprovalQueue};
use freyja_review::brand::{BrandGuidelines, BrandVoiceChecker};
use freyja_storage::memory::MemoryStore;
use freyja_storage::s3::S3Store;
use freyja_storage::store::ItemStore;

use freyja_dashboard::config::{AiProvider, LogFormat, Settings, StoreBackend};
use freyja_dashboard::shutdown;
use freyja_dashboard::views::Views;
use freyja_dashboard::{router, AppState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    // Loaded at most once, and only when a backend needs AWS.
    let aws: OnceCell<SdkConfig> = OnceCell::new();

    let store: Arc<dyn ItemStore> = match &settings.store {
        StoreBackend::Memory => {
            warn!("using the in-memory store; content is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::S3 { bucket } => {
            let config = aws.get_or_init(freyja_storage::client::load_config).await;
            Arc::new(S3Store::new(freyja_storage::client::build_client(config), bucket.clone()))
        }
    };

    let publisher: Arc<dyn Publisher> = match &settings.twitter {
        Some(config) => Arc::new(TwitterPublisher::new(config.clone())),
        None => {
            info!("no Twitter credentials configured, publishing in simulation mode");
            Arc::new(SimulatedPublisher::new())
        }
    };

    let generator: Arc<dyn ContentGenerator> = match &settings.ai {
        AiProvider::Simulation => Arc::new(SimulatedGenerator::new()),
        AiProvider::Bedrock { model_id } => {
            let config = aws.get_or_init(freyja_storage::client::load_config).await;
            Arc::new(BedrockGenerator::new(config, model_id.clone()))
        }
    };

    let guidelines = match &settings.brand_config {
        Some(path) => BrandGuidelines::from_json_file(path)?,
        None => BrandGuidelines::default(),
    };
    let checker = BrandVoiceChecker::new(guidelines)?;
    let views = Views::new(settings.time_zone.clone())?;

    let queue = Arc::new(ApprovalQueue::new(store, publisher));
    let state = AppState {
        queue: Arc::clone(&queue),
        generator,
        checker: Arc::new(checker),
        views: Arc::new(views),
        auto_publish: settings.auto_publish.clone(),
    };

    let cancel = CancellationToken::new();
    let sweeper = settings
        .auto_publish
        .clone()
        .map(|config| sweep::spawn(Arc::clone(&queue), config, cancel.clone()));

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    info!(
        addr = %settings.bind,
        store = queue.store().backend(),
        auto_publish = sweeper.is_some(),
        "freyja dashboard listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await?;

    cancel.cancel();
    if let Some(handle) = sweeper {
        handle.await?;
    }
    info!("shut down cleanly");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
