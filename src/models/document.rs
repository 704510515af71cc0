//! 文档数据模型
//!
//! 文档本体归外部文档源所有，这里只读取分类相关字段；
//! 唯一的本地改动是打开文档后的已读标志。

use chrono::{DateTime, Utc};

/// 已读状态的同步情况
///
/// "本地已确认、远端尽力而为"：远端写入失败时本地标志照常置位，
/// 但同步状态停留在 `LocalOnly`，持续的远端故障不会被掩盖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSync {
    /// 尚未打开过
    #[default]
    Unviewed,
    /// 本地已标记，远端写入失败
    LocalOnly,
    /// 本地与远端均已确认
    Synced,
}

/// 文档
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// 文档 ID
    #[serde(alias = "doc_id")]
    pub id: String,

    /// 文档名称
    #[serde(default, alias = "title")]
    pub name: String,

    /// 文档类型
    #[serde(default, alias = "type")]
    pub doc_type: Option<String>,

    /// 处理状态（后端自由字符串，如 completed / in_review）
    #[serde(default)]
    pub status: Option<String>,

    /// 优先级（后端自由字符串，如 low / normal / high）
    #[serde(default)]
    pub priority: Option<String>,

    /// 所属部门
    #[serde(default)]
    pub dept_name: Option<String>,

    /// 上传时间，RFC 3339 字符串，分类时再解析
    #[serde(default)]
    pub uploaded_at: Option<String>,

    /// 是否已读
    #[serde(default)]
    pub viewed: bool,

    /// 是否已标记为已读
    #[serde(default)]
    pub marked_as_read: bool,

    /// 内容引用（下载或预览地址）
    #[serde(default, alias = "url")]
    pub content_url: Option<String>,

    /// 已读同步状态，仅本地维护
    #[serde(skip)]
    pub view_sync: ViewSync,
}

impl Document {
    /// 状态字段是否等于给定值（大小写不敏感）
    pub fn status_is(&self, status: &str) -> bool {
        self.status
            .as_deref()
            .map(|value| value.eq_ignore_ascii_case(status))
            .unwrap_or(false)
    }

    /// 优先级字段是否等于给定值（大小写不敏感）
    pub fn priority_is(&self, priority: &str) -> bool {
        self.priority
            .as_deref()
            .map(|value| value.eq_ignore_ascii_case(priority))
            .unwrap_or(false)
    }

    /// 是否在最近 `days` 天内上传
    ///
    /// 时间字段缺失或无法解析时一律视为非近期
    pub fn is_recent(&self, days: i64) -> bool {
        let raw = match self.uploaded_at.as_deref() {
            Some(raw) => raw,
            None => return false,
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(uploaded) => {
                let age = Utc::now().signed_duration_since(uploaded.with_timezone(&Utc));
                age <= chrono::Duration::days(days)
            }
            Err(_) => false,
        }
    }

    /// 置位本地已读标志并记录同步状态
    pub fn mark_viewed_local(&mut self, sync: ViewSync) {
        self.viewed = true;
        self.marked_as_read = true;
        self.view_sync = sync;
    }
}
