use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    // El usuario aun no paga, el QR sigue vigente
    #[default]
    #[display("pending")]
    Pending,
    // El pago ha sido aprobado y acreditado con éxito
    #[display("approved")]
    Approved,
    // El pago ha sido autorizado pero aún no se ha capturado
    #[display("authorized")]
    Authorized,
    // El pago está en proceso de revisión
    #[display("in_process")]
    InProcess,
    // El usuario inicio una disputa
    #[display("in_mediation")]
    InMediation,
    // El pago fue rechazado (el usuario puede intentar pagar nuevamente)
    #[display("rejected")]
    Rejected,
    // El pago fue cancelado por alguna de las partes o caducó
    #[display("cancelled")]
    Cancelled,
    // El pago fue reembolsado al usuario.
    #[display("refunded")]
    Refunded,
    #[display("charged_back")]
    ChargedBack,
    // Estado no listado, se devuelve tal cual lo envía Mercado Pago
    #[serde(untagged)]
    #[display("{_0}")]
    Other(String),
}

/// Amount in cents that passed the `> 0` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountInCents(i64);

impl AmountInCents {
    /// `None` when the amount is missing or not positive
    pub fn new(cents: Option<i64>) -> Option<Self> {
        cents.filter(|c| *c > 0).map(Self)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// 12345 -> 123.45
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Two decimals string, the format EFI expects in `valor.original`
    pub fn to_brl_string(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }
}
