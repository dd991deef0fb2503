//! 负载入库函数库
//!
//! 这是一个由 HTTP 触发的无服务器函数，主要功能包括：
//! - 接收 JSON 负载并写入本地临时文件
//! - 以当前时间戳命名创建新的 S3 存储桶
//! - 将负载作为对象上传到新建的存储桶
//! - 既可以运行在 AWS Lambda 中，也可以作为本地 HTTP 服务器运行

pub mod config;
pub mod handlers;
pub mod ingest;
pub mod storage;
pub mod telemetry;
pub mod utils;

use axum::routing::post;
use config::AppConfig;
use ingest::IngestService;
use std::sync::Arc;
use storage::{ObjectStore, S3Store};
use tower_http::trace::TraceLayer;
use utils::clock::{Clock, SystemClock};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestService>,
    pub body_limit: usize,
}

impl AppState {
    /// 使用给定的存储客户端和时钟构建应用状态。
    pub fn new(config: &AppConfig, store: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ingest: Arc::new(IngestService::new(config, store, clock)),
            body_limit: config.body_limit,
        }
    }

    /// 使用真实的 S3 客户端和系统时钟构建应用状态。
    pub async fn from_config(config: &AppConfig) -> Self {
        let store = S3Store::from_config(config).await;
        Self::new(config, Arc::new(store), Arc::new(SystemClock))
    }
}

/// 创建并配置Axum应用程序
///
/// 任意路径的 POST 请求都交给入库处理器，其他方法返回 405。
///
/// # Returns
///
/// 返回配置好的Axum Router实例
pub fn app(state: AppState) -> axum::Router {
    axum::Router::new()
        .fallback(post(handlers::handle_ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
