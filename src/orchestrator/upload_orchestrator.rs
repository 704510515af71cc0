//! 多目标上传编排器 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动一次提交对全部目标部门的顺序上传。
//!
//! ## 核心功能
//!
//! 1. **逐目标驱动**：严格按目标列表顺序，一次只传一个
//! 2. **状态跟踪**：每个目标一条记录，pending → uploading → 终态
//! 3. **进度发布**：每次状态迁移后发布一份不可变快照
//! 4. **限速**：相邻目标之间固定间隔，避免压垮上传端点
//! 5. **结果汇总**：运行结束后给出全量记录与成功/失败计数
//!
//! ## 设计特点
//!
//! - **顺序而非并发**：这是刻意的背压选择——上传端点只承受一路流量，
//!   进度列表单调前进、人眼可读、UI 无需对账；代价是总时延随目标数线性增长
//! - **全量尝试**：单个目标失败绝不中断兄弟目标，整个列表一定跑完
//! - **单写者**：进度表只由编排循环自己写，对外只发布快照
//! - **不支持中途取消**：运行一旦开始就跑到所有目标终态；
//!   想提前放弃的调用方只能丢弃结果，并自行对已成功的目标做补偿

use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::info;

use crate::clients::UploadTransport;
use crate::config::Config;
use crate::models::{ProgressSnapshot, UploadAttempt, UploadOutcome, ValidatedRequest};
use crate::workflow::{DispatchFlow, DispatchResult, UploadCtx};

/// 多目标上传编排器
pub struct UploadOrchestrator {
    flow: DispatchFlow,
    delay: Duration,
    progress_tx: watch::Sender<ProgressSnapshot>,
}

impl UploadOrchestrator {
    /// 创建新的编排器
    pub fn new(config: &Config) -> Self {
        let (progress_tx, _) = watch::channel(ProgressSnapshot::default());
        Self {
            flow: DispatchFlow::new(config),
            delay: Duration::from_millis(config.upload_delay_ms),
            progress_tx,
        }
    }

    /// 订阅进度快照
    ///
    /// 观察方总是看到最新的一份完整快照；快照内记录顺序与目标列表一致
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress_tx.subscribe()
    }

    /// 顺序处理全部目标
    ///
    /// 调用方契约：
    /// - 目标列表非空（Resolver 已保证；空列表是编程错误，直接报错）
    /// - 同一次提交在取得终态结果前不得再次调用本方法
    pub async fn orchestrate(
        &self,
        request: &ValidatedRequest,
        transport: &dyn UploadTransport,
    ) -> Result<UploadOutcome> {
        if request.destinations.is_empty() {
            // 合同违约：Resolver 应当已经拒绝空目标列表
            anyhow::bail!("目标列表为空，无法编排上传");
        }

        let total = request.destinations.len();
        log_run_start(request, total);

        // 每个目标一条 pending 记录，先发布初始快照
        let mut attempts: Vec<UploadAttempt> = request
            .destinations
            .iter()
            .map(|destination| UploadAttempt::pending(destination.as_str()))
            .collect();
        let mut success_count = 0;
        let mut failure_count = 0;
        self.publish(&attempts);

        for index in 0..total {
            let ctx = UploadCtx::new(
                request.destinations[index].clone(),
                index + 1,
                total,
                request.user_id.clone(),
                request.priority,
            );

            attempts[index].begin();
            self.publish(&attempts);

            // 单个目标的失败绝不中断后续目标（全量尝试语义）
            match self.flow.run(transport, &request.payload, &ctx).await {
                DispatchResult::Delivered(receipt) => {
                    attempts[index].succeed(receipt);
                    success_count += 1;
                }
                DispatchResult::Failed(message) => {
                    attempts[index].fail(message);
                    failure_count += 1;
                }
            }
            self.publish(&attempts);

            // 限速：相邻目标之间固定间隔，最后一个目标之后不再等待
            if index + 1 < total && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        let outcome = UploadOutcome {
            attempts,
            success_count,
            failure_count,
        };
        log_run_complete(&outcome);

        Ok(outcome)
    }

    /// 发布一份不可变进度快照（编排循环是唯一写者）
    fn publish(&self, attempts: &[UploadAttempt]) {
        self.progress_tx.send_replace(ProgressSnapshot {
            attempts: attempts.to_vec(),
        });
    }
}

// ========== 日志辅助函数 ==========

fn log_run_start(request: &ValidatedRequest, total: usize) {
    info!("{}", "=".repeat(60));
    info!("📤 开始上传: {}", request.payload.display_name());
    info!("📋 目标部门: {} 个，优先级: {}", total, request.priority);
    info!("{}", "=".repeat(60));
}

fn log_run_complete(outcome: &UploadOutcome) {
    info!("\n{}", "─".repeat(60));
    if outcome.is_all_failed() {
        info!("❌ 全部目标上传失败 ({})", outcome.failure_count);
    } else {
        info!(
            "✓ 上传完成: 成功 {}/{}",
            outcome.success_count,
            outcome.success_count + outcome.failure_count
        );
    }
    info!("{}", "─".repeat(60));
}
