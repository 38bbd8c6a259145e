pub const EFI_PRODUCTION_API_URL: &str = "https://pix.api.efipay.com.br";
pub const EFI_SANDBOX_API_URL: &str = "https://pix-h.api.efipay.com.br";
pub const MERCADO_PAGO_PAYMENTS_URL: &str = "https://api.mercadopago.com/v1/payments";

/// Lifetime of an EFI charge, sent as `calendario.expiracao`
pub const EFI_CHARGE_EXPIRATION_SECS: i64 = 3600;
pub const EFI_PLAN_INFO_NAME: &str = "Plano";

pub const MP_PIX_PAYMENT_METHOD_ID: &str = "pix";
pub const MP_DEFAULT_DESCRIPTION: &str = "Pagamento PIX";
pub const MP_DEFAULT_PLAN_TYPE: &str = "standard";
pub const MP_DEFAULT_PAYER_EMAIL: &str = "pagador-teste@domin.us";

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
