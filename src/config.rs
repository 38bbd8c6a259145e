//! Application configuration loaded from the environment.
//!
//! Server settings live in [`AppConfig`]. Each gateway has its own struct so the
//! two charge functions stay independent: a missing Mercado Pago token never
//! prevents the EFI function from serving and vice versa.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - Credentials are only checked for presence at request time, their values
//!   are not validated against the gateways at startup

use crate::consts;
use envconfig::Envconfig;

/// Web server configuration.
#[derive(Envconfig, Clone, Debug)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(from = "ENV", default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(from = "WEB_SERVER_HOST", default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "WEB_SERVER_PORT", default = "8080")]
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    #[envconfig(from = "PRIVATE_KEY_PATH", default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(from = "CERTIFICATE_PATH", default = "server.crt")]
    pub certificate_path: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

/// EFI Pay credentials and options.
///
/// Credentials are optional at load time, their presence is checked per
/// request through [`EfiConfig::credentials`].
#[derive(Envconfig, Clone, Debug, Default)]
pub struct EfiConfig {
    /// SENSITIVE: OAuth client id
    #[envconfig(from = "EFIPAY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// SENSITIVE: OAuth client secret
    #[envconfig(from = "EFIPAY_CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// EFI account id (SEMI-SENSITIVE)
    #[envconfig(from = "EFIPAY_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// `"true"` targets the homologation environment
    #[envconfig(from = "EFIPAY_SANDBOX")]
    pub sandbox: Option<String>,

    /// PIX key (chave) that receives the charges
    #[envconfig(from = "EFIPAY_PIX_KEY", default = "")]
    pub pix_key: String,

    /// Path to the PKCS#12 certificate issued by EFI for mutual TLS
    #[envconfig(from = "EFIPAY_CERTIFICATE_PATH")]
    pub certificate_path: Option<String>,

    /// SENSITIVE: password of the PKCS#12 certificate
    #[envconfig(from = "EFIPAY_CERTIFICATE_PASSWORD", default = "")]
    pub certificate_password: String,
}

/// Credentials required by every EFI call.
#[derive(Clone, Debug, PartialEq)]
pub struct EfiCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub account_id: String,
}

impl EfiConfig {
    pub fn is_sandbox(&self) -> bool {
        self.sandbox.as_deref() == Some("true")
    }

    /// Base url of the PIX api for the configured environment
    pub fn api_base_url(&self) -> &'static str {
        if self.is_sandbox() {
            return consts::EFI_SANDBOX_API_URL;
        }
        consts::EFI_PRODUCTION_API_URL
    }

    /// Returns the credentials only when all three are set and not blank.
    pub fn credentials(&self) -> Option<EfiCredentials> {
        Some(EfiCredentials {
            client_id: non_blank(&self.client_id)?,
            client_secret: non_blank(&self.client_secret)?,
            account_id: non_blank(&self.account_id)?,
        })
    }
}

/// Mercado Pago credentials.
#[derive(Envconfig, Clone, Debug, Default)]
pub struct MercadoPagoConfig {
    /// SENSITIVE: MercadoPago access token
    #[envconfig(from = "MERCADOPAGO_ACCESS_TOKEN")]
    pub access_token: Option<String>,
}

impl MercadoPagoConfig {
    pub fn access_token(&self) -> Option<String> {
        non_blank(&self.access_token)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
