//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责多目标调度与应用生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `upload_orchestrator` - 多目标上传编排器
//! - 严格按列表顺序逐个目标上传（刻意的背压选择）
//! - 每个目标一条记录：pending → uploading → success/error
//! - 每次状态迁移后发布不可变进度快照
//! - 全量尝试：单目标失败不中断兄弟目标
//! - 相邻目标之间固定间隔限速
//!
//! ### `dashboard` - 仪表盘会话
//! - 管理会话生命周期（初始化、刷新、统计）
//! - 整体拉取文档并委托分类器重建各摞
//! - 委托游标服务做卡片浏览
//! - 打开文档时乐观标记已读
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (处理 Vec<目标> / Vec<Document>)
//!     ↓
//! workflow::DispatchFlow (处理单个目标)
//!     ↓
//! services (能力层：resolver / categorizer / navigator / view_tracker)
//!     ↓
//! clients (基础设施：ApiClient)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：upload_orchestrator 管上传侧，dashboard 管文档侧
//! 2. **资源隔离**：只有编排层持有协作方句柄
//! 3. **向下依赖**：编排层 → workflow → services → clients
//! 4. **无业务判断**：只做调度、状态与统计

pub mod dashboard;
pub mod upload_orchestrator;

// 重新导出主要类型
pub use dashboard::Dashboard;
pub use upload_orchestrator::UploadOrchestrator;
