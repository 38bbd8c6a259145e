//! Failures of the charge functions.
//!
//! The orchestration in [`crate::api`] returns these, the HTTP layer picks
//! the status code and envelope of each one.

use derive_more::{Display, Error};
use serde_json::Value;

/// Failures of the EFI function. Every one is reported with its Portuguese
/// message, the attached detail is only logged.
#[derive(Debug, Display, Error)]
pub enum EfiChargeError {
    #[display("Credenciais EFI não configuradas")]
    MissingCredentials,
    #[display("Corpo da requisição inválido")]
    InvalidBody(#[error(not(source))] String),
    #[display("amount_in_cents precisa ser maior que zero")]
    NonPositiveAmount,
    #[display("Falha na autenticação EFI")]
    AuthenticationFailed(#[error(not(source))] String),
    #[display("Falha ao criar cobrança PIX")]
    ChargeCreationFailed(#[error(not(source))] String),
    #[display("Resposta inválida da EFI")]
    InvalidGatewayResponse(#[error(not(source))] String),
    #[display("Falha ao gerar QR Code")]
    QrCodeFailed(#[error(not(source))] String),
}

/// Failures of the Mercado Pago function.
#[derive(Debug, Display, Error)]
pub enum MercadoPagoError {
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("MERCADOPAGO_ACCESS_TOKEN não configurado")]
    MissingAccessToken,
    #[display("Corpo da requisição inválido")]
    InvalidBody(#[error(not(source))] String),
    #[display("amount_in_cents precisa ser maior que zero")]
    NonPositiveAmount,
    /// Non-success answer, status and body are passed through
    #[display("Falha ao criar pagamento PIX")]
    GatewayRejected {
        status: u16,
        #[error(not(source))]
        details: Option<Value>,
    },
    /// Success status with a body that can't be read as a payment
    #[display("Falha ao criar pagamento PIX")]
    UnreadableGatewayResponse {
        #[error(not(source))]
        details: Option<Value>,
    },
    #[display("Falha ao criar pagamento PIX")]
    GatewayUnreachable(#[error(not(source))] String),
}
