use ntex::{util::Bytes, web};

use super::AppState;
use crate::{api, models, models::errors::EfiChargeError};

/// Creates an EFI PIX charge.
///
/// Every failure, malformed body included, is answered with a 500 and
/// `{"error": <message>}`.
#[web::post("/create-efi-pix")]
pub async fn create_efi_pix(
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let request: models::efi::EfiChargeRequest = serde_json::from_slice(&body)
        .map_err(|e| EfiChargeError::InvalidBody(e.to_string()))?;

    let charge =
        api::efi::create_pix_charge(&app_state.efi.config, &app_state.efi.gateway, request)
            .await?;

    Ok(web::HttpResponse::Ok().json(&charge))
}
