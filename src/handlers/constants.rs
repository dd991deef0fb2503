/// 成功响应体
pub const SUCCESS_MESSAGE: &str = "Data successfully processed and stored in S3.";

/// 成功响应的内容类型
pub const SUCCESS_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
