//! 上传目标上下文
//!
//! 封装"我正在把这份负载送往哪个目标"这一信息

use std::fmt::Display;

use crate::models::Priority;

/// 上传目标上下文
///
/// 包含投递单个目标所需的全部上下文信息
#[derive(Debug, Clone)]
pub struct UploadCtx {
    /// 目标部门
    pub destination: String,

    /// 目标在列表中的序号（从1开始，仅用于日志显示）
    pub destination_index: usize,

    /// 目标总数
    pub total: usize,

    /// 提交用户 ID
    pub user_id: String,

    /// 上传优先级
    pub priority: Priority,
}

impl UploadCtx {
    /// 创建新的上传上下文
    pub fn new(
        destination: String,
        destination_index: usize,
        total: usize,
        user_id: String,
        priority: Priority,
    ) -> Self {
        Self {
            destination,
            destination_index,
            total,
            user_id,
            priority,
        }
    }
}

impl Display for UploadCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[目标 {} {}/{} 用户#{}]",
            self.destination, self.destination_index, self.total, self.user_id
        )
    }
}
