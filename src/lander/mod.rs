pub mod error;
mod rpc;

pub use error::LanderError;
pub use rpc::{LanderReceipt, RpcLander};
