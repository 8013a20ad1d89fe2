//! Bitrix24 infrastructure: client configuration, wire shapes and the
//! port implementations

mod bitrix_crm;
mod config;
mod wire;

pub use bitrix_crm::BitrixCrm;
pub use config::BitrixConfig;
