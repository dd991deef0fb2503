//! HTTP请求处理模块
//!
//! 此模块包含了处理入库请求的处理器以及响应相关的常量。

pub mod constants;
pub mod ingest;

// 重新导出主要的公共接口
pub use ingest::handle_ingest;
