use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use capital_cupid::config::{Settings, StorageBackend};
use capital_cupid::core::Matcher;
use capital_cupid::routes::{self, AppState};
use capital_cupid::services::{FileStore, GrantCache, LocalStore, MemoryStore, RegistryClient, StaticCatalog};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn open_store(settings: &Settings) -> std::io::Result<Arc<dyn LocalStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; state will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let store = FileStore::open(&settings.storage.data_dir).map_err(|e| {
                error!("Failed to open data directory {:?}: {}", settings.storage.data_dir, e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            info!("Using file storage at {:?}", settings.storage.data_dir);
            Ok(Arc::new(store))
        }
    }
}

fn build_registry(settings: &Settings) -> std::io::Result<Option<Arc<RegistryClient>>> {
    let Some(base_url) = settings.registry.base_url.clone() else {
        info!("No registry configured, using the static catalog and mock submissions");
        return Ok(None);
    };

    let cache = GrantCache::new(settings.registry.cache_size, settings.registry.cache_ttl_secs);
    let client = RegistryClient::new(base_url, settings.registry.timeout_secs, cache).map_err(|e| {
        error!("Failed to build registry client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Registry client initialized ({}, cache: {} entries, TTL: {}s)",
        client.base_url(),
        settings.registry.cache_size,
        settings.registry.cache_ttl_secs
    );
    Ok(Some(Arc::new(client)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings);
    info!("Starting Capital Cupid grant matching service...");

    let store = open_store(&settings)?;
    let registry = build_registry(&settings)?;

    let weights = settings.matching.weights();
    let matcher = Matcher::new(weights);
    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState::new(
        store,
        Arc::new(StaticCatalog::default()),
        registry,
        matcher,
        settings.deck.decision_log,
    );
    info!("Decision log policy: {:?}", settings.deck.decision_log);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
