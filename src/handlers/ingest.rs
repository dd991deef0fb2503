use super::constants::{SUCCESS_CONTENT_TYPE, SUCCESS_MESSAGE};
use crate::AppState;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use lambda_http::RequestExt;
use tracing::Instrument;
use uuid::Uuid;

/// 获取本次调用的 ID。
///
/// 运行在 Lambda 中时使用运行时提供的请求 ID，本地运行时生成随机 UUID。
///
/// # 参数
///
/// * `req` - HTTP 请求。
///
/// # 返回值
///
/// 调用 ID 字符串。
pub fn invocation_id<B>(req: &http::Request<B>) -> String {
    req.lambda_context_ref()
        .map(|ctx| ctx.request_id.clone())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// 处理入库请求。
///
/// 读取请求体并交给 `IngestService` 执行完整的入库流程。
/// 成功时返回 200 和固定的确认文本；失败时只返回状态码，错误原因仅记录在服务端日志中。
///
/// # 参数
///
/// * `State(state)` - 应用状态。
/// * `req` - HTTP 请求。
///
/// # 返回值
///
/// HTTP 响应。
pub async fn handle_ingest(State(state): State<AppState>, req: Request) -> Response {
    let invocation_id = invocation_id(&req);
    let span = tracing::info_span!("ingest", invocation_id = %invocation_id);

    process(state, req, invocation_id).instrument(span).await
}

async fn process(state: AppState, req: Request, invocation_id: String) -> Response {
    // 请求体读取失败（包括超过大小上限）按非法输入处理
    let body = match to_bytes(req.into_body(), state.body_limit).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read request body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state.ingest.ingest(&body, &invocation_id).await {
        Ok(receipt) => {
            tracing::info!(
                bucket = %receipt.bucket,
                key = %receipt.key,
                bytes = receipt.bytes,
                "payload stored"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, SUCCESS_CONTENT_TYPE)],
                SUCCESS_MESSAGE,
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::Context;

    #[test]
    fn test_invocation_id_prefers_lambda_request_id() {
        let mut ctx = Context::default();
        ctx.request_id = "c6af9ac6-7b61-11e6-9a41-93e812345678".to_string();

        let req = http::Request::new(()).with_lambda_context(ctx);
        assert_eq!(invocation_id(&req), "c6af9ac6-7b61-11e6-9a41-93e812345678");
    }

    #[test]
    fn test_invocation_id_is_unique_outside_lambda() {
        let req = http::Request::new(());
        let first = invocation_id(&req);
        let second = invocation_id(&req);

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
