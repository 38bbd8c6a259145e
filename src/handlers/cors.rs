//! CORS headers sent by the Mercado Pago function on every answer, errors included.

use ntex::{http, web};

use crate::consts;

pub fn response_builder(status: http::StatusCode) -> http::ResponseBuilder {
    let mut builder = web::HttpResponse::build(status);
    builder
        .set_header("access-control-allow-origin", consts::CORS_ALLOW_ORIGIN)
        .set_header("access-control-allow-headers", consts::CORS_ALLOW_HEADERS);
    builder
}

/// Answer to the browser preflight request
pub fn preflight() -> web::HttpResponse {
    response_builder(http::StatusCode::OK).body("ok")
}
