pub mod efi;
pub mod errors;
pub mod mp_paym;
pub mod payment;
