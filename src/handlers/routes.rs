//! Route configuration of the charge functions.

use super::{efi, mercado_pago};
use ntex::web;

/// Configures the PIX charge functions.
///
/// # Routes
/// - `POST /functions/v1/create-efi-pix` - EFI Pay charge with QR code
/// - `OPTIONS|POST /functions/v1/create-mercadopago-pix` - Mercado Pago PIX payment.
///   Every other method is answered by the handler itself with a 405.
pub fn charge_functions(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/functions/v1").service((
        efi::create_efi_pix,
        web::resource("/create-mercadopago-pix").to(mercado_pago::create_mercadopago_pix),
    )));
}
