//! 基础设施层（外部协作方）
//!
//! 持有 HTTP 资源，只对上层暴露能力接口；
//! 上层通过 trait 依赖协作方，测试中可以整体替换。

pub mod api_client;

pub use api_client::ApiClient;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::models::{Document, Priority, UploadPayload};

/// 上传传输能力：把一份负载送到单个目标部门
///
/// 任何 Err 都视为该目标的失败；实现方负责把后端的
/// `success = false` 响应同样折叠成 Err
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// 上传单个目标，成功时返回后端回执
    async fn upload_one(
        &self,
        payload: &UploadPayload,
        destination: &str,
        priority: Priority,
        user_id: &str,
    ) -> Result<JsonValue>;
}

/// 文档数据源能力：列出文档、标记已读
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 列出用户可见的全部文档
    async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>>;

    /// 把文档标记为已读
    async fn mark_viewed(&self, user_id: &str, doc_id: &str) -> Result<()>;
}
