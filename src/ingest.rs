//! 负载入库流程
//!
//! 一次调用按顺序执行以下步骤，任一步失败即终止：
//! 1. 将请求体解析为 `InboundPayload`
//! 2. 根据时钟和前缀生成存储桶名称
//! 3. 将负载重新序列化为 JSON
//! 4. 写入本次调用的临时文件
//! 5. 创建存储桶
//! 6. 上传对象
//!
//! 失败不会重试，也不会回滚已经创建的存储桶。

use crate::config::AppConfig;
use crate::storage::{ObjectStore, StorageError};
use crate::utils::clock::Clock;
use crate::utils::s3::bucket_name;
use crate::utils::scratch::ScratchSpace;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// 请求负载
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundPayload {
    pub data: String,
}

impl<'de> Deserialize<'de> for InboundPayload {
    /// 解析规则：
    /// - 顶层 `null` 视为空负载
    /// - `data` 缺省或为 `null` 时视为空字符串
    /// - 字段名也接受 `Data`
    /// - 未知字段被忽略
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            #[serde(default, alias = "Data")]
            data: Option<String>,
        }

        let fields = Option::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            data: fields.and_then(|f| f.data).unwrap_or_default(),
        })
    }
}

/// 成功入库后的回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    pub bucket: String,
    pub key: String,
    pub bytes: usize,
}

/// 入库流程错误
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request body is not a valid payload: {0}")]
    Validation(#[source] serde_json::Error),

    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write scratch file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IngestError {
    /// 错误对应的 HTTP 状态码：输入错误为 400，其余均为 500。
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IngestError {
    /// 只在服务端记录错误原因，调用方只会收到状态码
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_client_error() {
            tracing::warn!(error = %self, "rejected request");
        } else {
            tracing::error!(error = %self, "ingest failed");
        }
        status.into_response()
    }
}

/// 入库服务
///
/// 存储客户端和时钟以依赖注入的方式传入，测试时可以替换为假实现。
pub struct IngestService {
    store: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    scratch: ScratchSpace,
    region: String,
    bucket_prefix: String,
    object_key: String,
}

impl IngestService {
    pub fn new(config: &AppConfig, store: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            scratch: ScratchSpace::new(config.scratch_dir.clone()),
            region: config.region.clone(),
            bucket_prefix: config.bucket_prefix.clone(),
            object_key: config.object_key.clone(),
        }
    }

    /// 执行一次完整的入库流程。
    ///
    /// # 参数
    ///
    /// * `body` - 原始请求体。
    /// * `invocation_id` - 本次调用的 ID，用于派生临时文件名。
    ///
    /// # 返回值
    ///
    /// 成功时返回存储桶名称、对象键和上传的字节数。
    ///
    /// # Errors
    ///
    /// 解析、写文件、创建存储桶或上传失败时返回对应的 `IngestError`。
    pub async fn ingest(
        &self,
        body: &[u8],
        invocation_id: &str,
    ) -> Result<IngestReceipt, IngestError> {
        // 必须先解析再写文件，非法请求不产生任何副作用
        let payload: InboundPayload =
            serde_json::from_slice(body).map_err(IngestError::Validation)?;
        tracing::debug!(data_len = payload.data.len(), "received payload");

        let bucket = bucket_name(&self.bucket_prefix, self.clock.unix_seconds());
        let encoded = serde_json::to_vec(&payload).map_err(IngestError::Encode)?;

        let scratch_file = self
            .scratch
            .write(invocation_id, &encoded)
            .await
            .map_err(|source| IngestError::Io {
                path: self.scratch.path_for(invocation_id),
                source,
            })?;
        tracing::debug!(path = %scratch_file.path().display(), "wrote scratch file");

        let bytes = encoded.len();
        let result = self.store_remote(&bucket, encoded).await;
        scratch_file.discard().await;
        result?;

        Ok(IngestReceipt {
            bucket,
            key: self.object_key.clone(),
            bytes,
        })
    }

    async fn store_remote(&self, bucket: &str, body: Vec<u8>) -> Result<(), StorageError> {
        self.store.create_bucket(bucket, &self.region).await?;
        tracing::info!(bucket, region = %self.region, "created bucket");

        // 上传失败时保留已创建的存储桶
        self.store.put_object(bucket, &self.object_key, body).await
    }
}
