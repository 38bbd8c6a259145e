use ntex::{http, util::Bytes, web};

use super::{AppState, cors};
use crate::{api, models, models::errors::MercadoPagoError};

/// Creates a Mercado Pago PIX payment.
///
/// Checks run in this order, each one answering before any outbound call:
/// method, access token, json body, amount.
pub async fn create_mercadopago_pix(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<web::HttpResponse, web::Error> {
    if *req.method() == http::Method::OPTIONS {
        return Ok(cors::preflight());
    }

    if *req.method() != http::Method::POST {
        return Err(MercadoPagoError::MethodNotAllowed.into());
    }

    let access_token = app_state
        .mercado_pago
        .config
        .access_token()
        .ok_or(MercadoPagoError::MissingAccessToken)?;

    let request: models::mp_paym::PixPaymentRequest = serde_json::from_slice(&body)
        .map_err(|e| MercadoPagoError::InvalidBody(e.to_string()))?;

    let payment =
        api::payment::create_pix_payment(&app_state.mercado_pago.gateway, &access_token, request)
            .await?;

    Ok(cors::response_builder(http::StatusCode::OK).json(&payment))
}
