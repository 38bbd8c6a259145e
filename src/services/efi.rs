use anyhow::{Context, bail};
use async_trait::async_trait;
use log::error;

use crate::{config, models};

/// EFI Pay PIX api client
#[derive(Clone)]
pub struct EfiPayClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl EfiPayClient {
    /// Builds the http client, attaching the PKCS#12 certificate when one is
    /// configured
    pub fn from_config(efi_config: &config::EfiConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(path) = &efi_config.certificate_path {
            let der = std::fs::read(path)
                .with_context(|| format!("failed to read EFI certificate at {path}"))?;
            let identity =
                reqwest::Identity::from_pkcs12_der(&der, &efi_config.certificate_password)
                    .context("EFI certificate is not a valid PKCS#12 file")?;
            builder = builder.identity(identity);
        }

        Ok(Self {
            client: builder.build().context("failed to build EFI http client")?,
            base_url: efi_config.api_base_url().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// Fails with the status and the body returned by EFI
async fn ensure_success(response: reqwest::Response, step: &str) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());
    error!("EFI {step} returned {status}: {body}");

    bail!("EFI {step} returned error status {status}")
}

#[async_trait]
impl crate::services::EfiGateway for EfiPayClient {
    async fn request_access_token(
        &self,
        credentials: &config::EfiCredentials,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(self.endpoint("/oauth/token"))
            .header("content-type", "application/json")
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .json(&models::efi::EfiTokenRequest::default())
            .send()
            .await
            .context("failed to send request to EFI oauth endpoint")?;

        let token = ensure_success(response, "oauth")
            .await?
            .json::<models::efi::EfiTokenResponse>()
            .await
            .context("failed to parse EFI oauth response")?;

        Ok(token.access_token)
    }

    async fn create_charge(
        &self,
        access_token: &str,
        cob: &models::efi::EfiCob,
    ) -> anyhow::Result<models::efi::EfiChargeResponse> {
        let response = self
            .client
            .post(self.endpoint("/v2/cob"))
            .header("content-type", "application/json")
            .bearer_auth(access_token)
            .json(cob)
            .send()
            .await
            .context("failed to send request to EFI cob endpoint")?;

        ensure_success(response, "cob")
            .await?
            .json::<models::efi::EfiChargeResponse>()
            .await
            .context("failed to parse EFI cob response")
    }

    async fn fetch_qrcode(
        &self,
        access_token: &str,
        location_id: i64,
    ) -> anyhow::Result<models::efi::EfiQrCode> {
        let response = self
            .client
            .get(self.endpoint(&format!("/v2/loc/{location_id}/qrcode")))
            .bearer_auth(access_token)
            .send()
            .await
            .context("failed to send request to EFI qrcode endpoint")?;

        ensure_success(response, "qrcode")
            .await?
            .json::<models::efi::EfiQrCode>()
            .await
            .context("failed to parse EFI qrcode response")
    }
}
