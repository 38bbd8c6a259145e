use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::payment::{AmountInCents, PaymentStatus};
use crate::consts;

/// Body accepted by the Mercado Pago charge function.
///
/// Read leniently: the amount may come as a numeric string, and optional
/// fields of an unexpected json type are treated as absent.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PixPaymentRequest {
    #[serde(deserialize_with = "deserialize_cents")]
    pub amount_in_cents: Option<i64>,
    #[serde(deserialize_with = "deserialize_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub plan_type: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub external_reference: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub payer_email: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub notification_url: Option<String>,
    #[serde(deserialize_with = "deserialize_object")]
    pub metadata: Option<Map<String, Value>>,
    pub public_key: Option<Value>,
}

/// Integers, integral floats and numeric strings. Anything else reads as no
/// amount and fails the `> 0` check later.
fn deserialize_cents<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cents = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(cents)
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn deserialize_object<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone, PartialEq)]
pub struct PayerInfo {
    pub email: String,
}

/// Payload of `POST /v1/payments`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaymentInfo {
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub description: String,
    pub payment_method_id: String,
    pub payer: PayerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    pub external_reference: String,
    pub metadata: Map<String, Value>,
}

impl PaymentInfo {
    /// Applies the defaults of every optional field. `new_reference` is only
    /// called when the caller did not send an `external_reference`.
    pub fn new(
        request: PixPaymentRequest,
        amount: AmountInCents,
        new_reference: impl FnOnce() -> String,
    ) -> Self {
        let plan_type = request
            .plan_type
            .unwrap_or_else(|| consts::MP_DEFAULT_PLAN_TYPE.into());

        let mut metadata = Map::new();
        metadata.insert("plan_type".into(), Value::String(plan_type));
        if let Some(public_key) = request.public_key {
            metadata.insert("public_key".into(), public_key);
        }
        // caller's keys win over the defaults above
        metadata.extend(request.metadata.unwrap_or_default());

        Self {
            transaction_amount: amount.to_decimal(),
            description: request
                .description
                .unwrap_or_else(|| consts::MP_DEFAULT_DESCRIPTION.into()),
            payment_method_id: consts::MP_PIX_PAYMENT_METHOD_ID.into(),
            payer: PayerInfo {
                email: request
                    .payer_email
                    .unwrap_or_else(|| consts::MP_DEFAULT_PAYER_EMAIL.into()),
            },
            notification_url: request.notification_url,
            external_reference: request.external_reference.unwrap_or_else(new_reference),
            metadata,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct TransactionData {
    pub qr_code: Option<String>,
    pub qr_code_base64: Option<String>,
    pub ticket_url: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct PointOfInteraction {
    pub transaction_data: Option<TransactionData>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct TransactionDetails {
    pub external_resource_url: Option<String>,
}

/// Response of `POST /v1/payments`, every field optional
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct PaymentResponse {
    pub id: Option<u64>,
    pub status: Option<PaymentStatus>,
    pub point_of_interaction: Option<PointOfInteraction>,
    pub transaction_details: Option<TransactionDetails>,
    pub date_of_expiration: Option<String>,
    pub date_created: Option<String>,
    pub transaction_amount: Option<Decimal>,
    pub external_reference: Option<String>,
}

/// Body returned by the Mercado Pago charge function on success
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PixPaymentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    pub qr_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_base64: Option<String>,
    pub copy_paste_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub transaction_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl From<PaymentResponse> for PixPaymentResult {
    fn from(payment: PaymentResponse) -> Self {
        let transaction_data = payment
            .point_of_interaction
            .and_then(|poi| poi.transaction_data)
            .unwrap_or_default();

        let qr_code = transaction_data.qr_code.unwrap_or_default();

        Self {
            payment_id: payment.id,
            status: payment.status,
            copy_paste_key: qr_code.clone(),
            qr_code,
            qr_code_base64: transaction_data.qr_code_base64,
            ticket_url: transaction_data.ticket_url.or(payment
                .transaction_details
                .and_then(|details| details.external_resource_url)),
            expires_at: payment.date_of_expiration.or(payment.date_created),
            transaction_amount: payment.transaction_amount,
            reference: payment.external_reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payment_info(body: Value) -> PaymentInfo {
        let request: PixPaymentRequest = serde_json::from_value(body).unwrap();
        let amount = AmountInCents::new(request.amount_in_cents).unwrap();
        PaymentInfo::new(request, amount, || "generated-ref".into())
    }

    #[test]
    fn test_payment_info_defaults() {
        let payload = serde_json::to_value(payment_info(json!({"amount_in_cents": 12345}))).unwrap();

        assert_eq!(
            payload,
            json!({
                "transaction_amount": 123.45,
                "description": "Pagamento PIX",
                "payment_method_id": "pix",
                "payer": {"email": "pagador-teste@domin.us"},
                "external_reference": "generated-ref",
                "metadata": {"plan_type": "standard"},
            })
        );
    }

    #[test]
    fn test_payment_info_keeps_caller_values() {
        let info = payment_info(json!({
            "amount_in_cents": 990,
            "description": "Assinatura",
            "plan_type": "pro",
            "external_reference": "order-7",
            "payer_email": "cliente@example.com",
            "notification_url": "https://example.com/hook",
            "public_key": "APP_USR-pk",
        }));

        assert_eq!(info.transaction_amount, dec!(9.90));
        assert_eq!(info.description, "Assinatura");
        assert_eq!(info.external_reference, "order-7");
        assert_eq!(info.payer.email, "cliente@example.com");
        assert_eq!(info.notification_url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(info.metadata.get("plan_type"), Some(&json!("pro")));
        assert_eq!(info.metadata.get("public_key"), Some(&json!("APP_USR-pk")));
    }

    #[test]
    fn test_payment_info_caller_metadata_overrides_defaults() {
        let info = payment_info(json!({
            "amount_in_cents": 100,
            "plan_type": "pro",
            "metadata": {"plan_type": "override", "user_id": 42},
        }));

        assert_eq!(info.metadata.get("plan_type"), Some(&json!("override")));
        assert_eq!(info.metadata.get("user_id"), Some(&json!(42)));
        assert!(info.metadata.get("public_key").is_none());
    }

    #[test]
    fn test_request_reads_numeric_string_amount() {
        let info = payment_info(json!({"amount_in_cents": "100"}));
        assert_eq!(info.transaction_amount, dec!(1.00));

        let info = payment_info(json!({"amount_in_cents": 250.0}));
        assert_eq!(info.transaction_amount, dec!(2.50));
    }

    #[test]
    fn test_request_ignores_fields_of_unexpected_type() {
        let request: PixPaymentRequest = serde_json::from_value(json!({
            "amount_in_cents": "abc",
            "description": 5,
            "payer_email": null,
            "metadata": ["not", "an", "object"],
        }))
        .unwrap();

        assert!(request.amount_in_cents.is_none());
        assert!(request.description.is_none());
        assert!(request.payer_email.is_none());
        assert!(request.metadata.is_none());

        let info = payment_info(json!({"amount_in_cents": 100, "description": 5}));
        assert_eq!(info.description, "Pagamento PIX");
    }

    #[test]
    fn test_result_from_full_response() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "id": 1319493021,
            "status": "pending",
            "date_of_expiration": "2026-10-17T12:00:00.000-04:00",
            "date_created": "2026-10-16T12:00:00.000-04:00",
            "transaction_amount": 123.45,
            "external_reference": "order-7",
            "point_of_interaction": {
                "transaction_data": {
                    "qr_code": "ABC",
                    "qr_code_base64": "iVBORw0KGgo",
                    "ticket_url": "https://www.mercadopago.com.br/payments/1/ticket"
                }
            },
            "transaction_details": {"external_resource_url": "https://other"}
        }))
        .unwrap();

        let result = PixPaymentResult::from(response);

        assert_eq!(result.payment_id, Some(1319493021));
        assert_eq!(result.status, Some(PaymentStatus::Pending));
        assert_eq!(result.qr_code, "ABC");
        assert_eq!(result.copy_paste_key, "ABC");
        assert_eq!(result.qr_code_base64.as_deref(), Some("iVBORw0KGgo"));
        assert_eq!(
            result.ticket_url.as_deref(),
            Some("https://www.mercadopago.com.br/payments/1/ticket")
        );
        assert_eq!(result.expires_at.as_deref(), Some("2026-10-17T12:00:00.000-04:00"));
        assert_eq!(result.transaction_amount, Some(dec!(123.45)));
        assert_eq!(result.reference.as_deref(), Some("order-7"));

        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["transactionAmount"], json!(123.45));
    }

    #[test]
    fn test_result_tolerates_missing_nested_objects() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "id": 10,
            "status": "pending",
            "date_created": "2026-10-16T12:00:00.000-04:00",
            "transaction_details": {"external_resource_url": "https://fallback"}
        }))
        .unwrap();

        let result = PixPaymentResult::from(response);

        assert_eq!(result.qr_code, "");
        assert_eq!(result.copy_paste_key, "");
        assert!(result.qr_code_base64.is_none());
        assert_eq!(result.ticket_url.as_deref(), Some("https://fallback"));
        assert_eq!(result.expires_at.as_deref(), Some("2026-10-16T12:00:00.000-04:00"));

        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["paymentId"], json!(10));
        assert!(body.get("transactionAmount").is_none());
        assert_eq!(body["qrCode"], json!(""));
        assert!(body.get("qrCodeBase64").is_none());
    }
}
