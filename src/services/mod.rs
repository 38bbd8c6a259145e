pub mod efi;
pub mod mercado_pago;

use crate::{config, models};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EfiGateway {
    /// OAuth2 client-credentials exchange, returns the bearer token
    async fn request_access_token(
        &self,
        credentials: &config::EfiCredentials,
    ) -> anyhow::Result<String>;

    async fn create_charge(
        &self,
        access_token: &str,
        cob: &models::efi::EfiCob,
    ) -> anyhow::Result<models::efi::EfiChargeResponse>;

    async fn fetch_qrcode(
        &self,
        access_token: &str,
        location_id: i64,
    ) -> anyhow::Result<models::efi::EfiQrCode>;
}

/// Raw answer of the gateway. Non-success statuses are not errors here, the
/// caller passes them through.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub status: u16,
    /// `None` when the body is not json
    pub body: Option<serde_json::Value>,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MercadoPagoGateway {
    async fn create_payment(
        &self,
        access_token: &str,
        idempotency_key: &str,
        payment: &models::mp_paym::PaymentInfo,
    ) -> anyhow::Result<GatewayReply>;
}

pub type ImplEfiGateway = Box<dyn EfiGateway>;
pub type ImplMercadoPagoGateway = Box<dyn MercadoPagoGateway>;
