//! EFI Pay PIX api payloads.
//!
//! Field names follow the Portuguese names of the `/v2/cob` api, serde renames
//! keep the Rust side in English.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::payment::AmountInCents;
use crate::consts;

/// Body accepted by the EFI charge function
#[derive(Deserialize, Debug, Clone)]
pub struct EfiChargeRequest {
    pub amount_in_cents: i64,
    pub plan_type: String,
    pub description: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub payer_email: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct EfiTokenRequest {
    pub grant_type: &'static str,
}

impl Default for EfiTokenRequest {
    fn default() -> Self {
        Self {
            grant_type: "client_credentials",
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EfiTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EfiCalendar {
    #[serde(rename = "expiracao")]
    pub expiration: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EfiValue {
    pub original: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EfiDebtor {
    pub email: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EfiAdditionalInfo {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "valor")]
    pub value: String,
}

/// Immediate charge (cobrança imediata) sent to `POST /v2/cob`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EfiCob {
    #[serde(rename = "calendario")]
    pub calendar: EfiCalendar,
    #[serde(rename = "valor")]
    pub value: EfiValue,
    #[serde(rename = "chave")]
    pub pix_key: String,
    #[serde(rename = "solicitacaoPagador")]
    pub payer_request: String,
    #[serde(rename = "infoAdicionais")]
    pub additional_info: Vec<EfiAdditionalInfo>,
    #[serde(rename = "devedor", skip_serializing_if = "Option::is_none")]
    pub debtor: Option<EfiDebtor>,
}

impl EfiCob {
    pub fn new(request: &EfiChargeRequest, amount: AmountInCents, pix_key: &str) -> Self {
        let mut additional_info = vec![EfiAdditionalInfo {
            name: consts::EFI_PLAN_INFO_NAME.into(),
            value: request.plan_type.clone(),
        }];

        if let Some(metadata) = &request.metadata {
            additional_info.extend(metadata.iter().map(|(name, value)| EfiAdditionalInfo {
                name: name.clone(),
                value: metadata_value_as_text(value),
            }));
        }

        Self {
            calendar: EfiCalendar {
                expiration: consts::EFI_CHARGE_EXPIRATION_SECS,
            },
            value: EfiValue {
                original: amount.to_brl_string(),
            },
            pix_key: pix_key.into(),
            payer_request: request.description.clone(),
            additional_info,
            debtor: request
                .payer_email
                .as_ref()
                .filter(|email| !email.is_empty())
                .map(|email| EfiDebtor {
                    email: email.clone(),
                }),
        }
    }
}

/// Strings are sent as is, any other json value as its json text
fn metadata_value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EfiLocation {
    pub id: i64,
}

/// Response of `POST /v2/cob`. Only the fields the function reads.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EfiChargeResponse {
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub loc: Option<EfiLocation>,
    #[serde(default, rename = "valor")]
    pub value: Option<EfiValue>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /v2/loc/{id}/qrcode`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EfiQrCode {
    #[serde(default)]
    pub qrcode: Option<String>,
    #[serde(default)]
    pub qrcode_text: Option<String>,
    #[serde(default, rename = "imagemQrcode")]
    pub image: Option<String>,
    #[serde(default, rename = "linkVisualizacao")]
    pub view_link: Option<String>,
}

/// Body returned by the EFI charge function on success
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EfiChargeResult {
    pub txid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrcode_text: Option<String>,
    pub valor: String,
    pub expiracao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrcode_image: Option<String>,
}
