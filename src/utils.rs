//! 工具函数模块
//!
//! 此模块包含了项目中使用的各种工具函数：
//! - 时钟抽象
//! - 路径处理工具（临时文件名清理）
//! - 本地临时文件管理
//! - S3 相关命名规则

pub mod clock;
pub mod path;
pub mod s3;
pub mod scratch;
