//! CLI 模块负责解析命令行参数并驱动 payee 提案流程。

mod prompt;
mod runner;

pub mod args;
pub mod context;

pub use runner::run;
