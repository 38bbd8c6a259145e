pub mod cors;
pub mod efi;
pub mod errors;
pub mod mercado_pago;
pub mod routes;
pub mod server;

use crate::{config, services};

/// State of the EFI charge function
pub struct EfiState {
    pub config: config::EfiConfig,
    pub gateway: services::ImplEfiGateway,
}

/// State of the Mercado Pago charge function
pub struct MercadoPagoState {
    pub config: config::MercadoPagoConfig,
    pub gateway: services::ImplMercadoPagoGateway,
}

pub struct AppState {
    pub efi: EfiState,
    pub mercado_pago: MercadoPagoState,
}
