//! 基于 AWS SDK 的对象存储实现。

use super::{ObjectStore, StorageError};
use crate::config::AppConfig;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use std::sync::Arc;

/// 不需要（也不接受）位置约束的区域
const DEFAULT_S3_REGION: &str = "us-east-1";

/// 上传对象的内容类型
const JSON_CONTENT_TYPE: &str = "application/json";

/// 根据应用配置创建 S3 客户端。
///
/// 凭证通过标准 AWS 凭证链获取；区域与可选端点来自配置。
/// SDK 自带的重试被关闭，每个请求只发送一次。
///
/// # 参数
///
/// * `config` - 应用配置。
///
/// # 返回值
///
/// 配置好的 `aws_sdk_s3::Client`。
pub async fn create_s3_client(config: &AppConfig) -> Client {
    let region_provider =
        RegionProviderChain::first_try(Some(Region::new(config.region.clone())));

    let mut config_builder = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .retry_config(RetryConfig::disabled());

    if let Some(endpoint) = &config.endpoint_url {
        config_builder = config_builder.endpoint_url(endpoint);
    }

    let sdk_config = config_builder.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style)
        .build();

    Client::from_conf(s3_config)
}

/// 使用 S3 客户端实现的对象存储
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Arc<Client>,
}

impl S3Store {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// 根据应用配置创建 S3 客户端并包装为 `S3Store`。
    pub async fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(create_s3_client(config).await))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StorageError> {
        let mut request = self.client.create_bucket().bucket(bucket);

        // us-east-1 以外的区域必须显式给出位置约束
        if region != DEFAULT_S3_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }

        request.send().await.map_err(|e| {
            let message = DisplayErrorContext(&e).to_string();
            let service_error = e.into_service_error();
            if service_error.is_bucket_already_exists()
                || service_error.is_bucket_already_owned_by_you()
            {
                StorageError::BucketExists {
                    bucket: bucket.to_string(),
                }
            } else {
                StorageError::CreateBucket {
                    bucket: bucket.to_string(),
                    message,
                }
            }
        })?;

        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(JSON_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::PutObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}
