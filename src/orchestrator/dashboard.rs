//! 仪表盘会话 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责文档侧的生命周期管理。
//!
//! ## 核心功能
//!
//! 1. **会话初始化**：准备日志文件、分类器与游标表
//! 2. **整体刷新**：拉取文档列表并重新划分各摞
//! 3. **容错降级**：列表源返回错误对象时按"零文档 + 暴露错误"处理
//! 4. **卡片浏览**：翻页与打开摞顶文档
//! 5. **乐观已读**：打开即置位本地标志，远端写入尽力而为
//! 6. **全局统计**：输出各摞数量
//!
//! ## 设计特点
//!
//! - **顶层编排**：不包含分类、游标的具体算法
//! - **资源所有者**：唯一持有文档源句柄的模块
//! - **整体重建**：摞永远由一次完整刷新重新导出，不做增量维护
//! - **向下委托**：委托 services 各能力完成具体动作

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::clients::DocumentStore;
use crate::config::Config;
use crate::models::{AuthUser, Document};
use crate::services::{DocumentCategorizer, StackNavigator, ViewTracker};
use crate::utils::logging::{init_log_file, truncate_text};

/// 仪表盘会话
pub struct Dashboard {
    config: Config,
    store: Arc<dyn DocumentStore>,
    categorizer: DocumentCategorizer,
    navigator: StackNavigator,
    view_tracker: ViewTracker,
    user: AuthUser,
    stacks: HashMap<String, Vec<Document>>,
    last_error: Option<String>,
}

impl Dashboard {
    /// 初始化仪表盘会话
    pub fn initialize(config: Config, user: AuthUser, store: Arc<dyn DocumentStore>) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config, &user);

        let categorizer = DocumentCategorizer::with_default_rules();
        // 空摞占位：文档到达前即可渲染全部卡片
        let stacks = categorizer.categorize(&[]);

        Ok(Self {
            config,
            store,
            categorizer,
            navigator: StackNavigator::new(),
            view_tracker: ViewTracker::new(),
            user,
            stacks,
            last_error: None,
        })
    }

    /// 运行一轮会话：刷新并输出统计
    pub async fn run(&mut self) -> Result<()> {
        self.refresh().await;
        print_stack_stats(
            &self.categorizer,
            &self.stacks,
            self.last_error.as_deref(),
            &self.config,
        );
        Ok(())
    }

    /// 刷新：重新拉取文档并整体重建各摞
    ///
    /// 列表源返回错误时按"零文档 + 暴露错误"降级，绝不让会话崩溃
    pub async fn refresh(&mut self) {
        info!("\n📁 正在拉取文档列表...");

        let documents = match self.store.list_documents(&self.user.id).await {
            Ok(documents) => {
                info!("✓ 共获取 {} 个文档", documents.len());
                self.last_error = None;
                documents
            }
            Err(e) => {
                warn!("⚠️ 获取文档失败: {}", e);
                self.last_error = Some(e.to_string());
                Vec::new()
            }
        };

        self.rebuild_stacks(&documents);
    }

    /// 整体重建各摞，并收敛每摞游标
    fn rebuild_stacks(&mut self, documents: &[Document]) {
        self.stacks = self.categorizer.categorize(documents);
        for (key, stack) in &self.stacks {
            self.navigator.on_stack_resized(key, stack.len());
        }
    }

    /// 某摞的当前内容；未知键视为空摞
    pub fn stack(&self, stack_key: &str) -> &[Document] {
        self.stacks
            .get(stack_key)
            .map(|stack| stack.as_slice())
            .unwrap_or(&[])
    }

    /// 全部摞键，按卡片渲染顺序
    pub fn stack_keys(&self) -> Vec<String> {
        self.categorizer.stack_keys()
    }

    /// 最近一次刷新暴露出的错误
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 某摞的当前摞顶文档
    pub fn current(&self, stack_key: &str) -> Option<&Document> {
        self.navigator.current(stack_key, self.stack(stack_key))
    }

    /// 翻到下一张卡片，返回新游标
    pub fn advance_stack(&mut self, stack_key: &str) -> usize {
        let len = self.stack(stack_key).len();
        self.navigator.advance(stack_key, len)
    }

    /// 打开摞顶文档：乐观标记已读并返回其副本
    ///
    /// 远端失败不阻塞本地打开；已读标志在所有摞中同步置位，
    /// 摞的成员关系只在下一次 refresh 时重建
    pub async fn open_top(&mut self, stack_key: &str) -> Option<Document> {
        let mut opened = self.current(stack_key)?.clone();

        info!("📖 打开文档: {}", truncate_text(&opened.name, 40));
        let sync = self
            .view_tracker
            .mark_viewed(self.store.as_ref(), &self.user.id, &mut opened)
            .await;

        // 同一文档可能出现在任意一摞，已读标志全部同步
        for stack in self.stacks.values_mut() {
            for document in stack.iter_mut().filter(|d| d.id == opened.id) {
                document.mark_viewed_local(sync);
            }
        }

        Some(opened)
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config, user: &AuthUser) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档仪表盘会话");
    info!("📊 后端地址: {}", config.api_base_url);
    info!("👤 当前用户: {}", user.id);
    info!("{}", "=".repeat(60));
}

fn print_stack_stats(
    categorizer: &DocumentCategorizer,
    stacks: &HashMap<String, Vec<Document>>,
    last_error: Option<&str>,
    config: &Config,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 各摞文档统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for key in categorizer.stack_keys() {
        let count = stacks.get(&key).map(Vec::len).unwrap_or(0);
        info!("  {}: {} 个", key, count);
    }
    if let Some(error) = last_error {
        info!("⚠️ 最近一次刷新错误: {}", error);
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
