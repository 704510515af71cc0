//! 摞游标服务 - 业务能力层
//!
//! 维护每摞"当前在顶部"的文档索引，供卡片式浏览循环翻页。
//! 会话级状态：随会话创建，从不持久化，重载后全部归零。

use std::collections::HashMap;

use crate::models::Document;

/// 摞游标
///
/// 职责：
/// - 每摞一个游标，默认 0
/// - `advance` 循环前进，到末尾后回绕而不是越界
/// - 摞长度变化时收敛游标，保证游标对当前摞长度始终合法
/// - 不认识分类规则，只看长度
#[derive(Debug, Default)]
pub struct StackNavigator {
    cursors: HashMap<String, usize>,
}

impl StackNavigator {
    /// 创建新的游标表
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前游标值，未出现过的键视为 0
    pub fn cursor(&self, stack_key: &str) -> usize {
        self.cursors.get(stack_key).copied().unwrap_or(0)
    }

    /// 前进一格并返回新游标
    ///
    /// 到达末尾后回绕到 0，可以无限循环翻阅；空摞上是空操作
    pub fn advance(&mut self, stack_key: &str, stack_len: usize) -> usize {
        let next = (self.cursor(stack_key) + 1) % stack_len.max(1);
        self.cursors.insert(stack_key.to_string(), next);
        next
    }

    /// 摞长度变化后收敛游标
    ///
    /// 每次整体重建摞（刷新、分类字段变化）之后都要调用
    pub fn on_stack_resized(&mut self, stack_key: &str, new_len: usize) {
        if self.cursor(stack_key) >= new_len {
            self.cursors
                .insert(stack_key.to_string(), new_len.saturating_sub(1));
        }
    }

    /// 当前摞顶文档；空摞返回 None
    pub fn current<'a>(&self, stack_key: &str, stack: &'a [Document]) -> Option<&'a Document> {
        stack.get(self.cursor(stack_key))
    }
}
