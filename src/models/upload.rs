//! 上传数据模型
//!
//! 定义一次多目标上传从提交到完成所涉及的全部类型：
//! 负载、已校验请求、逐目标记录、汇总结果与进度快照。

use serde_json::Value as JsonValue;

use crate::error::TransferError;

/// 上传表单的缺省部门选项
pub const DEPARTMENTS: [&str; 5] = [
    "Engineering",
    "Procurement",
    "HR",
    "Finance",
    "Legal & Compliance",
];

/// 上传优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// 低
    Low,
    /// 普通
    Normal,
    /// 高
    High,
}

impl Priority {
    /// 后端接口使用的小写名称
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    /// 尝试从字符串解析优先级（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 文件负载
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// 文件名（含扩展名）
    pub file_name: String,
    /// MIME 类型，可能为空字符串
    pub mime_type: String,
    /// 文件大小（字节）
    pub size: u64,
    /// 文件内容
    pub content: Vec<u8>,
}

/// 上传负载：二进制文件或 URL，提交后不再改动
#[derive(Debug, Clone)]
pub enum UploadPayload {
    /// 本地文件
    File(FilePayload),
    /// 文档链接
    Url(String),
}

impl UploadPayload {
    /// 用于日志与错误消息的展示名称
    pub fn display_name(&self) -> &str {
        match self {
            UploadPayload::File(file) => &file.file_name,
            UploadPayload::Url(url) => url,
        }
    }

    /// 生成一份独立的传输副本
    ///
    /// 每个目标拿到的都是自己的副本，负载绝不跨目标共享或复用
    pub fn to_transfer_unit(&self) -> UploadPayload {
        self.clone()
    }
}

/// 通过全部校验的上传请求
///
/// 由 `TargetSetResolver` 产出，此后视为只读
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    /// 上传负载
    pub payload: UploadPayload,
    /// 目标部门（有序、已去重）
    pub destinations: Vec<String>,
    /// 优先级
    pub priority: Priority,
    /// 提交用户 ID
    pub user_id: String,
}

/// 单个目标的上传状态
///
/// 只沿 pending → uploading → success/error 单向迁移，从不回退
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    /// 尚未开始
    Pending,
    /// 正在上传
    Uploading,
    /// 上传成功
    Success,
    /// 上传失败
    Error,
}

impl AttemptStatus {
    /// 是否已到达终态
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptStatus::Success | AttemptStatus::Error)
    }
}

/// 单个目标的上传记录
#[derive(Debug, Clone)]
pub struct UploadAttempt {
    /// 目标部门
    pub destination: String,
    /// 当前状态
    pub status: AttemptStatus,
    /// 人类可读的状态说明
    pub message: String,
    /// 上传成功时的后端回执
    pub result: Option<JsonValue>,
}

impl UploadAttempt {
    /// 新建一条等待中的记录
    pub fn pending(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            status: AttemptStatus::Pending,
            message: "等待中...".to_string(),
            result: None,
        }
    }

    /// 标记为正在上传（仅允许从 pending 前进）
    pub fn begin(&mut self) {
        if self.status == AttemptStatus::Pending {
            self.status = AttemptStatus::Uploading;
            self.message = "正在上传...".to_string();
        }
    }

    /// 标记为成功并记录回执（终态不再改动）
    pub fn succeed(&mut self, result: JsonValue) {
        if !self.status.is_terminal() {
            self.status = AttemptStatus::Success;
            self.message = "上传成功".to_string();
            self.result = Some(result);
        }
    }

    /// 标记为失败并记录原因（终态不再改动）
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.status.is_terminal() {
            self.status = AttemptStatus::Error;
            self.message = message.into();
        }
    }
}

/// 一次编排运行的汇总结果
#[derive(Debug, Clone, Default)]
pub struct UploadOutcome {
    /// 逐目标记录，顺序与目标列表一致
    pub attempts: Vec<UploadAttempt>,
    /// 成功目标数
    pub success_count: usize,
    /// 失败目标数
    pub failure_count: usize,
}

impl UploadOutcome {
    /// 是否所有目标全部失败
    pub fn is_all_failed(&self) -> bool {
        self.success_count == 0
    }

    /// 失败目标的逐条错误
    pub fn failures(&self) -> Vec<TransferError> {
        self.attempts
            .iter()
            .filter(|attempt| attempt.status == AttemptStatus::Error)
            .map(|attempt| TransferError::DestinationFailed {
                destination: attempt.destination.clone(),
                message: attempt.message.clone(),
            })
            .collect()
    }

    /// 面向调用方的最终结论
    ///
    /// 部分成功按成功上报（附成功数量）；全部失败时返回聚合错误，
    /// 其中包含每个目标各自的失败原因
    pub fn report(&self) -> Result<String, TransferError> {
        if self.is_all_failed() {
            let failures = self
                .attempts
                .iter()
                .map(|attempt| (attempt.destination.clone(), attempt.message.clone()))
                .collect();
            return Err(TransferError::AllDestinationsFailed { failures });
        }
        Ok(format!("已上传至 {} 个部门", self.success_count))
    }
}

/// 进度快照
///
/// 编排器在每次状态迁移后发布的不可变视图，观察方只读
#[derive(Debug, Clone, Default)]
pub struct ProgressSnapshot {
    /// 逐目标记录，顺序与目标列表一致
    pub attempts: Vec<UploadAttempt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_round_trip() {
        assert_eq!(Priority::from_str("low"), Some(Priority::Low));
        assert_eq!(Priority::from_str("normal"), Some(Priority::Normal));
        assert_eq!(Priority::from_str("high"), Some(Priority::High));
        assert_eq!(Priority::from_str("urgent"), None);
        assert_eq!(Priority::default().as_str(), "normal");
    }

    #[test]
    fn test_attempt_never_regresses() {
        let mut attempt = UploadAttempt::pending("HR");
        assert_eq!(attempt.status, AttemptStatus::Pending);

        attempt.begin();
        assert_eq!(attempt.status, AttemptStatus::Uploading);

        attempt.succeed(serde_json::json!({"doc_id": "d1"}));
        assert_eq!(attempt.status, AttemptStatus::Success);

        // 终态之后的迁移全部被忽略
        attempt.fail("late failure");
        assert_eq!(attempt.status, AttemptStatus::Success);
        assert_eq!(attempt.message, "上传成功");
    }

    #[test]
    fn test_begin_only_from_pending() {
        let mut attempt = UploadAttempt::pending("HR");
        attempt.begin();
        attempt.fail("网络错误");
        attempt.begin();
        assert_eq!(attempt.status, AttemptStatus::Error);
        assert_eq!(attempt.message, "网络错误");
    }

    #[test]
    fn test_outcome_report_partial_success() {
        let mut ok = UploadAttempt::pending("HR");
        ok.begin();
        ok.succeed(serde_json::json!({}));
        let mut bad = UploadAttempt::pending("Finance");
        bad.begin();
        bad.fail("quota exceeded");

        let outcome = UploadOutcome {
            attempts: vec![ok, bad],
            success_count: 1,
            failure_count: 1,
        };

        assert!(!outcome.is_all_failed());
        assert_eq!(outcome.report().unwrap(), "已上传至 1 个部门");
        assert_eq!(outcome.failures().len(), 1);
    }

    #[test]
    fn test_outcome_report_all_failed() {
        let mut a = UploadAttempt::pending("HR");
        a.begin();
        a.fail("超时");
        let mut b = UploadAttempt::pending("Finance");
        b.begin();
        b.fail("quota exceeded");

        let outcome = UploadOutcome {
            attempts: vec![a, b],
            success_count: 0,
            failure_count: 2,
        };

        let err = outcome.report().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("HR"));
        assert!(text.contains("quota exceeded"));
    }
}
