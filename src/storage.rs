//! 对象存储模块
//!
//! 该模块定义了函数所需的两个远端操作：创建存储桶和上传对象。
//! 生产环境使用 `s3::S3Store`，测试中使用 `MockObjectStore`。

pub mod s3;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub use s3::S3Store;

/// 远端存储操作错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 同名存储桶已存在（同一秒内的两次调用会产生相同的名称）
    #[error("bucket `{bucket}` already exists")]
    BucketExists { bucket: String },

    #[error("failed to create bucket `{bucket}`: {message}")]
    CreateBucket { bucket: String, message: String },

    #[error("failed to upload `{key}` to bucket `{bucket}`: {message}")]
    PutObject {
        bucket: String,
        key: String,
        message: String,
    },
}

/// 对象存储客户端
#[automock]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 在指定区域创建存储桶。
    ///
    /// # Errors
    ///
    /// 存储桶已存在或服务端拒绝请求时返回 `StorageError`。
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StorageError>;

    /// 将内容作为对象上传到存储桶。
    ///
    /// # Errors
    ///
    /// 上传失败时返回 `StorageError::PutObject`。
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StorageError>;
}
