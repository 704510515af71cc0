//! 已读标记服务 - 业务能力层
//!
//! 只负责"标记已读"能力：远端尽力而为，本地乐观确认。
//! 远端写入失败不会阻止本地打开文档。

use tracing::{debug, warn};

use crate::clients::DocumentStore;
use crate::models::{Document, ViewSync};

/// 已读标记服务
///
/// 职责：
/// - 打开文档时向远端写一条已读记录
/// - 远端失败只降级为 `LocalOnly`，本地标志照常置位
/// - 只处理单个文档，不出现 Vec<Document>
/// - 不关心摞与游标
#[derive(Debug, Default)]
pub struct ViewTracker;

impl ViewTracker {
    /// 创建新的已读标记服务
    pub fn new() -> Self {
        Self
    }

    /// 标记单个文档为已读，返回最终同步状态
    pub async fn mark_viewed(
        &self,
        store: &dyn DocumentStore,
        user_id: &str,
        document: &mut Document,
    ) -> ViewSync {
        let sync = match store.mark_viewed(user_id, &document.id).await {
            Ok(()) => {
                debug!("已读记录写入成功: 文档 {}", document.id);
                ViewSync::Synced
            }
            Err(e) => {
                warn!("⚠️ 远端标记已读失败 (文档 {}): {}", document.id, e);
                ViewSync::LocalOnly
            }
        };

        document.mark_viewed_local(sync);
        sync
    }
}
