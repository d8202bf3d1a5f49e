use actix_cors::Cors;
use actix_web::{App, HttpServer};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use dotenv::dotenv;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use issue_tracker::api::ApiDoc;
use issue_tracker::configuration::get_configuration;
use issue_tracker::telemetry::{get_subscriber, init_subscriber};
use issue_tracker::{build_service, routes};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration()?;

    let subscriber = get_subscriber(
        "issue_tracker".into(),
        settings.log_filter.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber)?;

    info!("애플리케이션 시작 중...");

    let service = Data::new(build_service(&settings).await?);
    let openapi = ApiDoc::openapi();

    let (host, port) = settings.address();
    info!("서버 시작 중: http://{}:{}", host, port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
        .bind((host, port))?
        .run()
        .await?;

    Ok(())
}
