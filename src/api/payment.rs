use log::{error, info};
use uuid::Uuid;

use crate::{
    models::{
        errors::MercadoPagoError,
        mp_paym::{PaymentInfo, PaymentResponse, PixPaymentRequest, PixPaymentResult},
        payment::AmountInCents,
    },
    services,
};

/// Submits a PIX payment to Mercado Pago and flattens the QR/ticket fields of
/// the answer.
///
/// The amount is validated before anything is sent. A non-success answer of
/// the gateway becomes [`MercadoPagoError::GatewayRejected`] carrying the
/// gateway status and body.
pub async fn create_pix_payment(
    gateway: &services::ImplMercadoPagoGateway,
    access_token: &str,
    request: PixPaymentRequest,
) -> Result<PixPaymentResult, MercadoPagoError> {
    let amount =
        AmountInCents::new(request.amount_in_cents).ok_or(MercadoPagoError::NonPositiveAmount)?;

    let payment = PaymentInfo::new(request, amount, || Uuid::new_v4().to_string());
    let idempotency_key = Uuid::new_v4().to_string();

    let reply = gateway
        .create_payment(access_token, &idempotency_key, &payment)
        .await
        .map_err(|e| MercadoPagoError::GatewayUnreachable(format!("{e:#}")))?;

    if !reply.is_success() {
        return Err(MercadoPagoError::GatewayRejected {
            status: reply.status,
            details: reply.body,
        });
    }

    let Some(body) = reply.body else {
        return Err(MercadoPagoError::UnreadableGatewayResponse { details: None });
    };

    let payment_response = match serde_json::from_value::<PaymentResponse>(body.clone()) {
        Ok(p) => p,
        Err(e) => {
            error!("mercado pago payment response couldnt be parsed: {e}");
            return Err(MercadoPagoError::UnreadableGatewayResponse {
                details: Some(body),
            });
        }
    };

    info!(
        "mercado pago payment {:?} created for reference {}",
        payment_response.id, payment.external_reference
    );

    Ok(PixPaymentResult::from(payment_response))
}
