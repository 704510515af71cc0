//! # Doc Dashboard Client
//!
//! 文档管理仪表盘客户端核心：多目标上传编排 + 文档分摞浏览
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 资源，只暴露能力接口
//! - `ApiClient` - 唯一的后端句柄，实现上传传输与文档源两种能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个请求/文档
//! - `TargetSetResolver` - 上传前校验能力
//! - `DocumentCategorizer` - 分摞能力
//! - `StackNavigator` - 摞游标能力
//! - `ViewTracker` - 乐观已读能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个目标"的完整投递流程
//! - `UploadCtx` - 上下文封装（目标 + 序号 + 用户）
//! - `DispatchFlow` - 流程编排（副本 → 传输 → 折叠失败）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/upload_orchestrator` - 多目标顺序上传，进度快照与结果汇总
//! - `orchestrator/dashboard` - 仪表盘会话，拉取、分摞、浏览与统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ApiClient, DocumentStore, UploadTransport};
pub use config::{Config, UiPrefs};
pub use error::{AppError, AppResult, TransferError, ValidationError};
pub use models::{
    AttemptStatus, AuthUser, Document, FilePayload, Priority, ProgressSnapshot, UploadAttempt,
    UploadOutcome, UploadPayload, ValidatedRequest, ViewSync, DEPARTMENTS,
};
pub use orchestrator::{Dashboard, UploadOrchestrator};
pub use services::{
    DocumentCategorizer, StackNavigator, StackRule, TargetSetResolver, ViewTracker,
    FALLBACK_STACK_KEY,
};
pub use workflow::{DispatchFlow, DispatchResult, UploadCtx};
