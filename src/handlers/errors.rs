//! HTTP answers of the charge function failures.

use derive_more::{Display, Error};
use log::error;
use ntex::{http, web, web::error::WebResponseError};
use serde_json::{Value, json};

use super::cors;
use crate::models::errors::{EfiChargeError, MercadoPagoError};

impl EfiChargeError {
    fn get_error_message(&self) -> String {
        match self {
            EfiChargeError::InvalidBody(msg) => format!("[InvalidBody] {msg}"),
            EfiChargeError::AuthenticationFailed(msg) => format!("[AuthenticationFailed] {msg}"),
            EfiChargeError::ChargeCreationFailed(msg) => format!("[ChargeCreationFailed] {msg}"),
            EfiChargeError::InvalidGatewayResponse(msg) => {
                format!("[InvalidGatewayResponse] {msg}")
            }
            EfiChargeError::QrCodeFailed(msg) => format!("[QrCodeFailed] {msg}"),
            EfiChargeError::MissingCredentials => "[MissingCredentials]".to_string(),
            EfiChargeError::NonPositiveAmount => "[NonPositiveAmount]".to_string(),
        }
    }
}

/// The EFI function answers every failure with a 500 and `{"error": <message>}`
impl WebResponseError for EfiChargeError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("efi charge: {}", self.get_error_message());

        web::HttpResponse::build(self.status_code()).json(&json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl MercadoPagoError {
    fn body(&self) -> Value {
        match self {
            MercadoPagoError::GatewayRejected { details, .. }
            | MercadoPagoError::UnreadableGatewayResponse { details } => {
                json!({ "message": self.to_string(), "details": details })
            }
            _ => json!({ "message": self.to_string() }),
        }
    }
}

impl WebResponseError for MercadoPagoError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        match self {
            MercadoPagoError::InvalidBody(msg) | MercadoPagoError::GatewayUnreachable(msg) => {
                error!("mercado pago charge: {self}: {msg}")
            }
            MercadoPagoError::GatewayRejected { status, details } => {
                error!("mercado pago charge: gateway returned {status}: {details:?}")
            }
            _ => error!("mercado pago charge: {self}"),
        }

        cors::response_builder(self.status_code()).json(&self.body())
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            MercadoPagoError::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            MercadoPagoError::InvalidBody(_) | MercadoPagoError::NonPositiveAmount => {
                http::StatusCode::BAD_REQUEST
            }
            MercadoPagoError::GatewayRejected { status, .. } => http::StatusCode::from_u16(status)
                .unwrap_or(http::StatusCode::BAD_GATEWAY),
            MercadoPagoError::UnreadableGatewayResponse { .. } => http::StatusCode::BAD_GATEWAY,
            MercadoPagoError::MissingAccessToken | MercadoPagoError::GatewayUnreachable(_) => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Unknown routes
#[derive(Debug, Display, Error)]
#[display("Not found")]
pub struct NotFound;

impl WebResponseError for NotFound {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        web::HttpResponse::build(self.status_code()).json(&json!({ "message": self.to_string() }))
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::NOT_FOUND
    }
}
