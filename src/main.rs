//! # PIX charges
//!
//! Web server hosting the PIX charge functions: EFI Pay and Mercado Pago.
//! Each function has its own configuration and gateway client, nothing is
//! shared between them.

pub mod api;
pub mod config;
pub mod consts;
pub mod handlers;
pub mod logger;
pub mod models;
pub mod services;

use envconfig::Envconfig;
use log::{info, warn};
use ntex::web;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    let app_config = config::AppConfig::init_from_env()?;
    let efi_config = config::EfiConfig::init_from_env()?;
    let mercado_pago_config = config::MercadoPagoConfig::init_from_env()?;

    if efi_config.credentials().is_none() {
        warn!("EFI credentials are not configured, create-efi-pix will answer with 500");
    }
    if mercado_pago_config.access_token().is_none() {
        warn!("MERCADOPAGO_ACCESS_TOKEN is not configured, create-mercadopago-pix will answer with 500");
    }

    let efi_client = services::efi::EfiPayClient::from_config(&efi_config)?;
    let mercado_pago_client = services::mercado_pago::MercadoPagoClient::default();

    configure_and_run_server(
        app_config,
        efi_config,
        mercado_pago_config,
        efi_client,
        mercado_pago_client,
    )
    .await
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor(
    app_config: &config::AppConfig,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state from the provided configs and clients
fn create_app_state(
    efi_config: config::EfiConfig,
    mercado_pago_config: config::MercadoPagoConfig,
    efi_client: services::efi::EfiPayClient,
    mercado_pago_client: services::mercado_pago::MercadoPagoClient,
) -> handlers::AppState {
    handlers::AppState {
        efi: handlers::EfiState {
            config: efi_config,
            gateway: Box::new(efi_client),
        },
        mercado_pago: handlers::MercadoPagoState {
            config: mercado_pago_config,
            gateway: Box::new(mercado_pago_client),
        },
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    app_config: config::AppConfig,
    efi_config: config::EfiConfig,
    mercado_pago_config: config::MercadoPagoConfig,
    efi_client: services::efi::EfiPayClient,
    mercado_pago_client: services::mercado_pago::MercadoPagoClient,
) -> anyhow::Result<()> {
    let server_addr = (app_config.web_server_host.clone(), app_config.web_server_port);

    let server = web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .state(create_app_state(
                efi_config.clone(),
                mercado_pago_config.clone(),
                efi_client.clone(),
                mercado_pago_client.clone(),
            ))
            .configure(handlers::routes::charge_functions)
            .default_service(web::route().to(handlers::server::serve_not_found))
    });

    info!(
        "starting server on {}:{} (env: {})",
        server_addr.0, server_addr.1, app_config.env
    );

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor(&app_config)?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
