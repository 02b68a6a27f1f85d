use serde::Deserialize;
use serde::de::Deserializer;

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

/// Chainlink OCR2 聚合器主网程序地址。
pub const DEFAULT_OCR2_PROGRAM_ID: &str = "cjg3oHmg9uuPsP8D6g29NWvhySJkdYdAo9D25PRbKXJ";

pub(crate) fn default_logging_level() -> String {
    "info".to_string()
}

pub(crate) fn default_timezone_offset_hours() -> i8 {
    0
}

pub(crate) fn default_commitment() -> String {
    "confirmed".to_string()
}

pub(crate) fn default_program_id() -> String {
    DEFAULT_OCR2_PROGRAM_ID.to_string()
}

pub(crate) fn deserialize_rpc_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty()))
}
