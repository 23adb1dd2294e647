use actix_files::Files;
use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod form;
pub mod report;
pub mod state;
pub mod upload;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::form::handlers::index,
        crate::form::handlers::generate_report
    ),
    components(
        schemas(
            form::handlers::ReportFormRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Activity Report", description = "Report form and PDF generation.")
    )
)]
pub struct ApiDoc;

/// Routes for the report form. Shared by the server and the handler tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(form::handlers::index))
            .route(web::post().to(form::handlers::generate_report)),
    );
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| io_error(e.to_string()))?;
    tokio::fs::create_dir_all(&config.upload_folder).await?;
    let bind_address = config.bind_address();
    let app_state = web::Data::new(AppState::new(config));

    let prometheus = PrometheusMetricsBuilder::new("activity_report_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| io_error(format!("Failed to create Prometheus metrics middleware: {}", e)))?;

    log::info!(
        "Starting server at http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configure_routes)
            .service(Files::new("/static", "static"))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .default_service(web::to(form::handlers::not_found))
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_address)?
    .run()
    .await
}
