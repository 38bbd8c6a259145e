use chrono::{SecondsFormat, TimeDelta, Utc};
use log::info;

use crate::{
    config, consts,
    models::{
        efi::{EfiChargeRequest, EfiChargeResult, EfiCob},
        errors::EfiChargeError,
        payment::AmountInCents,
    },
    services,
};

/// Creates an immediate PIX charge on EFI and returns its QR code.
///
/// Runs three sequential calls: token exchange, `POST /v2/cob` and
/// `GET /v2/loc/{id}/qrcode`. The first failing step aborts the flow.
///
/// `expiracao` is computed locally as call time plus one hour, it is not read
/// from the charge returned by EFI.
pub async fn create_pix_charge(
    efi_config: &config::EfiConfig,
    gateway: &services::ImplEfiGateway,
    request: EfiChargeRequest,
) -> Result<EfiChargeResult, EfiChargeError> {
    let credentials = efi_config
        .credentials()
        .ok_or(EfiChargeError::MissingCredentials)?;

    let amount = AmountInCents::new(Some(request.amount_in_cents))
        .ok_or(EfiChargeError::NonPositiveAmount)?;

    let access_token = gateway
        .request_access_token(&credentials)
        .await
        .map_err(|e| EfiChargeError::AuthenticationFailed(format!("{e:#}")))?;

    let cob = EfiCob::new(&request, amount, &efi_config.pix_key);
    let charge = gateway
        .create_charge(&access_token, &cob)
        .await
        .map_err(|e| EfiChargeError::ChargeCreationFailed(format!("{e:#}")))?;

    let (txid, location_id) = match (charge.txid, charge.loc) {
        (Some(txid), Some(loc)) if !txid.is_empty() => (txid, loc.id),
        (txid, loc) => {
            return Err(EfiChargeError::InvalidGatewayResponse(format!(
                "cob response without txid or loc: txid={txid:?} loc={loc:?}"
            )));
        }
    };
    info!("efi charge {txid} created, location {location_id}");

    let qr = gateway
        .fetch_qrcode(&access_token, location_id)
        .await
        .map_err(|e| EfiChargeError::QrCodeFailed(format!("txid {txid}: {e:#}")))?;

    let qrcode_text = qr.qrcode_text.or_else(|| qr.qrcode.clone());
    let expiracao = (Utc::now() + TimeDelta::seconds(consts::EFI_CHARGE_EXPIRATION_SECS))
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    Ok(EfiChargeResult {
        txid,
        qrcode: qr.qrcode,
        qrcode_text,
        valor: charge.value.map(|v| v.original).unwrap_or(cob.value.original),
        expiracao,
        qrcode_image: qr.image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::efi::{EfiChargeResponse, EfiLocation, EfiQrCode, EfiValue};
    use crate::services::MockEfiGateway;
    use chrono::DateTime;
    use serde_json::json;

    fn efi_config() -> config::EfiConfig {
        config::EfiConfig {
            client_id: Some("client-id".into()),
            client_secret: Some("client-secret".into()),
            account_id: Some("123456".into()),
            pix_key: "pix@example.com".into(),
            ..Default::default()
        }
    }

    fn charge_request(amount_in_cents: i64) -> EfiChargeRequest {
        serde_json::from_value(json!({
            "amount_in_cents": amount_in_cents,
            "plan_type": "premium",
            "description": "Plano premium",
            "metadata": {"user_id": "u-1"},
        }))
        .unwrap()
    }

    fn charge_response() -> EfiChargeResponse {
        EfiChargeResponse {
            txid: Some("7978c0c97ea847e78e8849634473c1f1".into()),
            loc: Some(EfiLocation { id: 42 }),
            value: Some(EfiValue {
                original: "123.45".into(),
            }),
            status: Some("ATIVA".into()),
        }
    }

    #[ntex::test]
    async fn test_create_pix_charge_success() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway
            .expect_request_access_token()
            .withf(|credentials| {
                credentials.client_id == "client-id" && credentials.client_secret == "client-secret"
            })
            .times(1)
            .returning(|_| Ok("token-123".into()));
        mock_gateway
            .expect_create_charge()
            .withf(|token, cob| {
                token == "token-123"
                    && cob.value.original == "123.45"
                    && cob.pix_key == "pix@example.com"
                    && cob.additional_info.len() == 2
            })
            .times(1)
            .returning(|_, _| Ok(charge_response()));
        mock_gateway
            .expect_fetch_qrcode()
            .withf(|token, location_id| token == "token-123" && *location_id == 42)
            .times(1)
            .returning(|_, _| {
                Ok(EfiQrCode {
                    qrcode: Some("00020101021226830014BR.GOV.BCB.PIX".into()),
                    image: Some("data:image/png;base64,iVBOR".into()),
                    ..Default::default()
                })
            });
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let before = Utc::now();
        let result = create_pix_charge(&efi_config(), &gateway, charge_request(12345))
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(result.txid, "7978c0c97ea847e78e8849634473c1f1");
        assert_eq!(result.valor, "123.45");
        assert_eq!(result.qrcode.as_deref(), Some("00020101021226830014BR.GOV.BCB.PIX"));
        assert_eq!(result.qrcode_text, result.qrcode);
        assert_eq!(result.qrcode_image.as_deref(), Some("data:image/png;base64,iVBOR"));

        let expiracao = DateTime::parse_from_rfc3339(&result.expiracao)
            .unwrap()
            .with_timezone(&Utc);
        let one_hour = TimeDelta::seconds(3600);
        let millis = TimeDelta::milliseconds(1);
        assert!(expiracao >= before + one_hour - millis && expiracao <= after + one_hour);
        assert!(result.expiracao.ends_with('Z'));
    }

    #[ntex::test]
    async fn test_create_pix_charge_missing_credentials_never_calls_gateway() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway.expect_request_access_token().never();
        mock_gateway.expect_create_charge().never();
        mock_gateway.expect_fetch_qrcode().never();
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let efi_config = config::EfiConfig {
            account_id: None,
            ..efi_config()
        };
        let result = create_pix_charge(&efi_config, &gateway, charge_request(100)).await;

        assert!(matches!(result, Err(EfiChargeError::MissingCredentials)));
    }

    #[ntex::test]
    async fn test_create_pix_charge_auth_failure_stops_flow() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway
            .expect_request_access_token()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("EFI oauth returned error status 401")));
        mock_gateway.expect_create_charge().never();
        mock_gateway.expect_fetch_qrcode().never();
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let result = create_pix_charge(&efi_config(), &gateway, charge_request(100)).await;

        assert!(matches!(result, Err(EfiChargeError::AuthenticationFailed(_))));
    }

    #[ntex::test]
    async fn test_create_pix_charge_without_txid_is_invalid_response() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway
            .expect_request_access_token()
            .returning(|_| Ok("token".into()));
        mock_gateway.expect_create_charge().returning(|_, _| {
            Ok(EfiChargeResponse {
                txid: None,
                ..charge_response()
            })
        });
        mock_gateway.expect_fetch_qrcode().never();
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let result = create_pix_charge(&efi_config(), &gateway, charge_request(100)).await;

        assert!(matches!(result, Err(EfiChargeError::InvalidGatewayResponse(_))));
    }

    #[ntex::test]
    async fn test_create_pix_charge_without_loc_is_invalid_response() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway
            .expect_request_access_token()
            .returning(|_| Ok("token".into()));
        mock_gateway.expect_create_charge().returning(|_, _| {
            Ok(EfiChargeResponse {
                loc: None,
                ..charge_response()
            })
        });
        mock_gateway.expect_fetch_qrcode().never();
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let result = create_pix_charge(&efi_config(), &gateway, charge_request(100)).await;

        assert!(matches!(result, Err(EfiChargeError::InvalidGatewayResponse(_))));
    }

    #[ntex::test]
    async fn test_create_pix_charge_qrcode_failure() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway
            .expect_request_access_token()
            .returning(|_| Ok("token".into()));
        mock_gateway
            .expect_create_charge()
            .returning(|_, _| Ok(charge_response()));
        mock_gateway
            .expect_fetch_qrcode()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("EFI qrcode returned error status 404")));
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let result = create_pix_charge(&efi_config(), &gateway, charge_request(100)).await;

        assert!(matches!(result, Err(EfiChargeError::QrCodeFailed(_))));
    }

    #[ntex::test]
    async fn test_create_pix_charge_rejects_non_positive_amount() {
        let mut mock_gateway = MockEfiGateway::new();
        mock_gateway.expect_request_access_token().never();
        let gateway: services::ImplEfiGateway = Box::new(mock_gateway);

        let result = create_pix_charge(&efi_config(), &gateway, charge_request(0)).await;

        assert!(matches!(result, Err(EfiChargeError::NonPositiveAmount)));
    }
}
