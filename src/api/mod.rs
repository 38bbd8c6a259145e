//! # API Module
//!
//! Gateway orchestration behind each charge function. Handlers in
//! [`crate::handlers`] parse the request and hand the typed body over here.
//!
//! ## Modules
//!
//! - [`efi`] - EFI Pay token, charge and QR code flow
//! - [`payment`] - Mercado Pago PIX payment creation

pub mod efi;
pub mod payment;
