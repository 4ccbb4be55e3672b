use actix_cors::Cors;
use actix_web::{
    dev::Server, error::JsonPayloadError, http::header, middleware, web, App,
    HttpRequest, HttpServer, Scope,
};

use crate::{
    configuration::{AppState, State},
    controller::{
        accounts, bills, fixed_deposits, history, loans, recipients,
        transfers, version,
    },
    error::Error,
};

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;

    tracing::info!("Listening on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let allowed_cors = String::from("*");
        let cors_access_all =
            app.config.allowed_origins.contains(&allowed_cors);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                if cors_access_all {
                    return true;
                }
                let allowed = &app.config.allowed_origins;
                if let Ok(origin) = origin.to_str() {
                    return allowed.contains(&origin.to_owned());
                }
                false
            })
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
            .service(api())
    })
    .bind((host, port))?
    .disable_signals()
    .run();
    Ok(server)
}

fn api() -> Scope {
    web::scope("/api")
        .service(version::index)
        .service(accounts::open)
        .service(accounts::register)
        .service(accounts::summary)
        .service(transfers::index)
        .service(bills::index)
        .service(history::index)
        .service(history::reference)
        .service(recipients::get_index)
        .service(recipients::post_index)
        .service(loans::get_index)
        .service(loans::post_index)
        .service(loans::quote)
        .service(loans::get_loan)
        .service(loans::schedule)
        .service(loans::approve)
        .service(loans::reject)
        .service(loans::payment)
        .service(fixed_deposits::get_index)
        .service(fixed_deposits::post_index)
        .service(fixed_deposits::withdraw)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().limit(4096).error_handler(json_error)
}

/// Malformed bodies answer with the same JSON error shape as everything else.
fn json_error(error: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    Error::Validation(error.to_string()).into()
}
