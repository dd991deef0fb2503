/// 文件名主干的最大长度
const MAX_STEM_LEN: usize = 128;

/// 将任意标识符转换为可安全用作文件名主干的字符串
///
/// 只保留 ASCII 字母、数字、`-` 和 `_`，其他字符一律替换为 `_`，
/// 防止调用方提供的标识符逃逸出临时目录。
///
/// # 参数
///
/// * `id` - 原始标识符，例如 Lambda 请求 ID
///
/// # 返回值
///
/// 清理后的文件名主干；若输入为空则返回 `"invocation"`
///
/// # 示例
///
/// ```
/// use bucket_ingest::utils::path::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("8f4c-11ee"), "8f4c-11ee");
/// assert_eq!(sanitize_file_stem("../etc/passwd"), "___etc_passwd");
/// assert_eq!(sanitize_file_stem(""), "invocation");
/// ```
pub fn sanitize_file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .take(MAX_STEM_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "invocation".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_stem() {
        // 正常的请求 ID 保持不变
        assert_eq!(
            sanitize_file_stem("c6af9ac6-7b61-11e6-9a41-93e812345678"),
            "c6af9ac6-7b61-11e6-9a41-93e812345678"
        );

        // 路径分隔符和点被替换
        assert_eq!(sanitize_file_stem("a/b\\c.d"), "a_b_c_d");

        // 非 ASCII 字符被替换
        assert_eq!(sanitize_file_stem("请求"), "__");

        // 超长输入被截断
        assert_eq!(sanitize_file_stem(&"x".repeat(500)).len(), MAX_STEM_LEN);
    }
}
