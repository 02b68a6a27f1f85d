//! payee 提案的核心流程：输入解析、资格校验、按提案重排与指令编码。

mod builder;
mod eligibility;
mod error;
mod report;
mod resolver;
mod source;
mod types;

pub use builder::{ProposePayeesBuilder, ProposePayeesRequest};
pub use error::{ProposeError, ProposeResult};
pub use report::{InstructionReport, ProposePayeesResponse};
pub use resolver::{InputSource, resolve_input};
pub use types::PayeeInput;

pub(crate) use types::parse_pubkey;
#[cfg(test)]
pub(crate) use types::OperatorAssignment;

#[cfg(test)]
pub(crate) mod tests_support;
