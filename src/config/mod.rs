//! 函数的配置模块。
//!
//! 该模块负责从环境变量加载和校验配置。所有配置在冷启动时读取一次，
//! 之后以 `AppConfig` 的形式显式传入各个组件。

use crate::utils::s3::{MAX_OBJECT_KEY_LEN, validate_bucket_prefix};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// 默认区域
pub const DEFAULT_REGION: &str = "ap-south-1";

/// 默认存储桶名称前缀
pub const DEFAULT_BUCKET_PREFIX: &str = "your-prefix";

/// 默认上传对象键
pub const DEFAULT_OBJECT_KEY: &str = "your-file-name.json";

/// 默认临时目录（Lambda 环境中唯一可写的目录）
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// 本地运行时的默认监听地址
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// 默认请求体大小上限，与 Lambda 同步调用的负载上限一致（6 MiB）
pub const DEFAULT_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Lambda 运行时注入的环境变量，存在即表示运行在 Lambda 中
const LAMBDA_RUNTIME_API: &str = "AWS_LAMBDA_RUNTIME_API";

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    /// 由 Lambda 运行时驱动
    Lambda,
    /// 本地 HTTP 服务器
    Local,
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub region: String,
    pub bucket_prefix: String,
    pub object_key: String,
    pub scratch_dir: PathBuf,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub listen_addr: SocketAddr,
    pub body_limit: usize,
    pub runtime: RuntimeMode,
}

impl AppConfig {
    /// 从进程环境变量加载配置。
    ///
    /// # Errors
    ///
    /// 当任一环境变量的值不合法时返回 `ConfigError`。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 使用给定的查找函数加载配置。
    ///
    /// # 参数
    ///
    /// * `lookup` - 根据变量名返回变量值的函数，未设置时返回 `None`。
    ///
    /// # 返回值
    ///
    /// 校验通过的配置。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let region = get("BUCKET_REGION", DEFAULT_REGION);

        let bucket_prefix = get("BUCKET_PREFIX", DEFAULT_BUCKET_PREFIX);
        validate_bucket_prefix(&bucket_prefix).map_err(|reason| ConfigError::Invalid {
            key: "BUCKET_PREFIX",
            value: bucket_prefix.clone(),
            reason,
        })?;

        let object_key = get("OBJECT_KEY", DEFAULT_OBJECT_KEY);
        if object_key.len() > MAX_OBJECT_KEY_LEN {
            return Err(ConfigError::Invalid {
                key: "OBJECT_KEY",
                value: object_key,
                reason: format!("must be at most {MAX_OBJECT_KEY_LEN} bytes"),
            });
        }

        let scratch_dir = PathBuf::from(get("SCRATCH_DIR", DEFAULT_SCRATCH_DIR));

        let endpoint_url = lookup("S3_ENDPOINT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let force_path_style =
            parse_bool("S3_FORCE_PATH_STYLE", &get("S3_FORCE_PATH_STYLE", "false"))?;

        let listen_addr_raw = get("LISTEN_ADDR", DEFAULT_LISTEN_ADDR);
        let listen_addr = listen_addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "LISTEN_ADDR",
                value: listen_addr_raw.clone(),
                reason: e.to_string(),
            })?;

        let body_limit_raw = get("BODY_LIMIT_BYTES", &DEFAULT_BODY_LIMIT.to_string());
        let body_limit = match body_limit_raw.parse::<usize>() {
            Ok(limit) if limit > 0 => limit,
            Ok(_) => {
                return Err(ConfigError::Invalid {
                    key: "BODY_LIMIT_BYTES",
                    value: body_limit_raw,
                    reason: "must be greater than zero".to_string(),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid {
                    key: "BODY_LIMIT_BYTES",
                    value: body_limit_raw,
                    reason: e.to_string(),
                });
            }
        };

        let runtime = if lookup(LAMBDA_RUNTIME_API).is_some() {
            RuntimeMode::Lambda
        } else {
            RuntimeMode::Local
        };

        Ok(Self {
            region,
            bucket_prefix,
            object_key,
            scratch_dir,
            endpoint_url,
            force_path_style,
            listen_addr,
            body_limit,
            runtime,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
