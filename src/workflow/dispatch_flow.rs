//! 单目标投递流程 - 流程层
//!
//! 核心职责：定义"一个目标"的完整投递流程
//!
//! 流程顺序：
//! 1. 为本目标克隆独立的传输副本
//! 2. 调用传输能力上传
//! 3. 把传输异常折叠为本目标的失败结果（绝不向上传播）

use serde_json::Value as JsonValue;
use tracing::{debug, error, info};

use crate::clients::UploadTransport;
use crate::config::Config;
use crate::models::UploadPayload;
use crate::workflow::upload_ctx::UploadCtx;

/// 单目标投递结果
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// 投递成功，携带后端回执
    Delivered(JsonValue),
    /// 投递失败，携带人类可读的原因
    Failed(String),
}

/// 单目标投递流程

/// - 编排单个目标从副本到回执的完整过程
/// - 不持有任何资源（HTTP 客户端归基础设施层）
/// - 只处理单个目标，不出现目标列表
/// - 不决定目标顺序与间隔
pub struct DispatchFlow {
    verbose_logging: bool,
}

impl DispatchFlow {
    /// 创建新的投递流程
    pub fn new(config: &Config) -> Self {
        Self {
            verbose_logging: config.verbose_logging,
        }
    }

    /// 投递单个目标
    ///
    /// 传输层的任何 Err 都在这里折叠为 `Failed`，
    /// 返回值里不会出现需要调用方再处理的错误
    pub async fn run(
        &self,
        transport: &dyn UploadTransport,
        payload: &UploadPayload,
        ctx: &UploadCtx,
    ) -> DispatchResult {
        info!(
            "[目标 {}] 📤 正在上传 ({}/{})...",
            ctx.destination, ctx.destination_index, ctx.total
        );

        if self.verbose_logging {
            debug!(
                "[目标 {}] 负载: {} 优先级: {}",
                ctx.destination,
                payload.display_name(),
                ctx.priority
            );
        }

        // 每个目标使用独立的传输副本，负载绝不跨目标共享
        let transfer_unit = payload.to_transfer_unit();

        match transport
            .upload_one(&transfer_unit, &ctx.destination, ctx.priority, &ctx.user_id)
            .await
        {
            Ok(receipt) => {
                info!("[目标 {}] ✓ 上传成功", ctx.destination);
                DispatchResult::Delivered(receipt)
            }
            Err(e) => {
                error!("[目标 {}] ❌ 上传失败: {}", ctx.destination, e);
                DispatchResult::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilePayload, Priority};
    use anyhow::Result;
    use async_trait::async_trait;

    /// 总是失败的传输桩
    struct FailingTransport;

    #[async_trait]
    impl UploadTransport for FailingTransport {
        async fn upload_one(
            &self,
            _payload: &UploadPayload,
            _destination: &str,
            _priority: Priority,
            _user_id: &str,
        ) -> Result<JsonValue> {
            anyhow::bail!("quota exceeded")
        }
    }

    /// 总是成功的传输桩
    struct OkTransport;

    #[async_trait]
    impl UploadTransport for OkTransport {
        async fn upload_one(
            &self,
            _payload: &UploadPayload,
            destination: &str,
            _priority: Priority,
            _user_id: &str,
        ) -> Result<JsonValue> {
            Ok(serde_json::json!({"dept": destination}))
        }
    }

    fn ctx() -> UploadCtx {
        UploadCtx::new("HR".to_string(), 1, 1, "u1".to_string(), Priority::Normal)
    }

    fn payload() -> UploadPayload {
        UploadPayload::File(FilePayload {
            file_name: "a.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 3,
            content: vec![1, 2, 3],
        })
    }

    #[test]
    fn test_failure_is_folded_not_propagated() {
        let flow = DispatchFlow::new(&Config::default());
        let result =
            tokio_test::block_on(flow.run(&FailingTransport, &payload(), &ctx()));
        assert_eq!(result, DispatchResult::Failed("quota exceeded".to_string()));
    }

    #[test]
    fn test_delivery_carries_receipt() {
        let flow = DispatchFlow::new(&Config::default());
        let result = tokio_test::block_on(flow.run(&OkTransport, &payload(), &ctx()));
        match result {
            DispatchResult::Delivered(receipt) => {
                assert_eq!(receipt["dept"], "HR");
            }
            DispatchResult::Failed(reason) => panic!("不应失败: {}", reason),
        }
    }
}
