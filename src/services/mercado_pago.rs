use anyhow::Context;
use async_trait::async_trait;

use crate::{consts, models, services::GatewayReply};

#[derive(Clone)]
pub struct MercadoPagoClient {
    pub client: reqwest::Client,
    pub payments_url: String,
}

impl Default for MercadoPagoClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            payments_url: consts::MERCADO_PAGO_PAYMENTS_URL.into(),
        }
    }
}

#[async_trait]
impl crate::services::MercadoPagoGateway for MercadoPagoClient {
    async fn create_payment(
        &self,
        access_token: &str,
        idempotency_key: &str,
        payment: &models::mp_paym::PaymentInfo,
    ) -> anyhow::Result<GatewayReply> {
        let response = self
            .client
            .post(&self.payments_url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("X-Idempotency-Key", idempotency_key)
            .bearer_auth(access_token)
            .json(payment)
            .send()
            .await
            .context("failed to send request to mercado pago payments api")?;

        let status = response.status().as_u16();
        let body = response.json::<serde_json::Value>().await.ok();

        Ok(GatewayReply { status, body })
    }
}
