use actix_web::{get, web, Responder};
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[get("/version")]
pub async fn index() -> Result<impl Responder, Error> {
    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");
    const NAME: Option<&str> = option_env!("CARGO_PKG_NAME");

    Ok(web::Json(Response {
        name: NAME,
        version: VERSION,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response<'a> {
    pub name: Option<&'a str>,
    pub version: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};

    use super::*;

    #[actix_web::test]
    async fn test_version_endpoint() {
        let app = test::init_service(
            App::new().service(web::scope("/api").service(index)),
        )
        .await;
        let request = test::TestRequest::get().uri("/api/version").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["name"], "ledger");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
