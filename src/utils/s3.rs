/// S3 存储桶名称的最大长度
pub const MAX_BUCKET_NAME_LEN: usize = 63;

/// S3 对象键的最大字节数
pub const MAX_OBJECT_KEY_LEN: usize = 1024;

/// 为时间戳预留的位数（秒级 unix 时间戳在 2286 年前不超过 10 位，多留一位）
const TIMESTAMP_DIGITS: usize = 11;

/// 存储桶前缀的最大长度：名称上限减去连字符和时间戳
pub const MAX_BUCKET_PREFIX_LEN: usize = MAX_BUCKET_NAME_LEN - 1 - TIMESTAMP_DIGITS;

/// 根据前缀和 unix 时间戳（秒）生成存储桶名称。
///
/// # 参数
///
/// * `prefix` - 存储桶名称前缀。
/// * `unix_seconds` - 当前时间的 unix 秒数。
///
/// # 返回值
///
/// 形如 `<prefix>-<unix_seconds>` 的存储桶名称。
///
/// # 示例
///
/// ```
/// use bucket_ingest::utils::s3::bucket_name;
///
/// assert_eq!(bucket_name("your-prefix", 1000), "your-prefix-1000");
/// ```
pub fn bucket_name(prefix: &str, unix_seconds: u64) -> String {
    format!("{}-{}", prefix, unix_seconds)
}

/// 校验存储桶名称前缀。
///
/// 前缀只能包含小写字母、数字和连字符，必须以字母或数字开头，
/// 并且拼接时间戳后不能超过 S3 的名称长度上限。
///
/// # Errors
///
/// 校验失败时返回原因描述。
pub fn validate_bucket_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Err("must not be empty".to_string());
    }

    if prefix.len() > MAX_BUCKET_PREFIX_LEN {
        return Err(format!("must be at most {MAX_BUCKET_PREFIX_LEN} characters"));
    }

    if !prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("may only contain lowercase letters, digits and hyphens".to_string());
    }

    if prefix.starts_with('-') {
        return Err("must start with a letter or digit".to_string());
    }

    if prefix.starts_with("xn--") {
        return Err("must not start with the reserved prefix `xn--`".to_string());
    }

    Ok(())
}
