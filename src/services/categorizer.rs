//! 文档分类服务 - 业务能力层
//!
//! 把扁平的文档列表划分进固定的几摞（stack），供仪表盘按卡片渲染。
//!
//! ## 分类规则
//!
//! - 规则是一份**有序**配置，按优先级逐条求值
//! - 每个文档只进**第一条**命中的摞，绝不重复出现在多摞
//! - 什么都没命中的文档进兜底摞
//! - 每个配置过的键在结果里永远存在（空摞也占位），
//!   调用方渲染占位卡片时无需做存在性检查
//! - 稳定划分：摞内顺序等于输入顺序

use std::collections::HashMap;

use crate::models::Document;

/// 兜底摞键名
pub const FALLBACK_STACK_KEY: &str = "other";

/// 近期文档的时间窗口（天）
const RECENT_WINDOW_DAYS: i64 = 7;

/// 单条分类规则
pub struct StackRule {
    /// 摞的键名
    pub key: String,
    /// 展示名称
    pub label: String,
    predicate: Box<dyn Fn(&Document) -> bool + Send + Sync>,
}

impl StackRule {
    /// 创建新的规则
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        predicate: impl Fn(&Document) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    /// 文档是否命中本规则
    pub fn matches(&self, document: &Document) -> bool {
        (self.predicate)(document)
    }
}

/// 文档分类器
///
/// 职责：
/// - 按规则优先级把每个文档放进且只放进一摞
/// - 不改动文档身份，只读取分类字段
/// - 不维护增量状态：每次整体刷新时重新划分
/// - 不关心游标与浏览
pub struct DocumentCategorizer {
    rules: Vec<StackRule>,
    fallback_key: String,
}

impl DocumentCategorizer {
    /// 用一份有序规则创建分类器
    pub fn new(rules: Vec<StackRule>, fallback_key: impl Into<String>) -> Self {
        Self {
            rules,
            fallback_key: fallback_key.into(),
        }
    }

    /// 默认六摞配置（对应仪表盘卡片布局）
    pub fn with_default_rules() -> Self {
        Self::new(default_stack_rules(), FALLBACK_STACK_KEY)
    }

    /// 全部摞键，按规则优先级排列，兜底摞在最后
    pub fn stack_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.rules.iter().map(|rule| rule.key.clone()).collect();
        keys.push(self.fallback_key.clone());
        keys
    }

    /// 划分文档列表
    ///
    /// 相同输入与规则下输出恒等；空输入产出全部键到空摞的映射
    pub fn categorize(&self, documents: &[Document]) -> HashMap<String, Vec<Document>> {
        let mut stacks: HashMap<String, Vec<Document>> = HashMap::new();

        // 每个键始终占位
        for key in self.stack_keys() {
            stacks.entry(key).or_default();
        }

        for document in documents {
            let key = self
                .rules
                .iter()
                .find(|rule| rule.matches(document))
                .map(|rule| rule.key.as_str())
                .unwrap_or(self.fallback_key.as_str());

            stacks.entry(key.to_string()).or_default().push(document.clone());
        }

        stacks
    }
}

/// 默认的分类规则
///
/// 镜像仪表盘的六张卡片：待处理、已完成、审阅中、未读、近期、其他
pub fn default_stack_rules() -> Vec<StackRule> {
    vec![
        StackRule::new("needs_action", "待处理", |doc: &Document| {
            doc.priority_is("high") && !doc.status_is("completed")
        }),
        StackRule::new("completed", "已完成", |doc: &Document| {
            doc.status_is("completed")
        }),
        StackRule::new("in_review", "审阅中", |doc: &Document| {
            doc.status_is("in_review") || doc.status_is("processing")
        }),
        StackRule::new("unread", "未读", |doc: &Document| {
            !doc.viewed && !doc.marked_as_read
        }),
        StackRule::new("recent", "近期", |doc: &Document| {
            doc.is_recent(RECENT_WINDOW_DAYS)
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViewSync;

    fn doc(id: &str, status: Option<&str>, priority: Option<&str>, viewed: bool) -> Document {
        Document {
            id: id.to_string(),
            name: format!("{}.pdf", id),
            doc_type: None,
            status: status.map(String::from),
            priority: priority.map(String::from),
            dept_name: None,
            uploaded_at: None,
            viewed,
            marked_as_read: viewed,
            content_url: None,
            view_sync: ViewSync::default(),
        }
    }

    /// 测试用的小规则集（与时间无关，保证完全确定）
    fn categorizer() -> DocumentCategorizer {
        DocumentCategorizer::new(
            vec![
                StackRule::new("needs_action", "待处理", |d: &Document| {
                    d.priority_is("high") && !d.status_is("completed")
                }),
                StackRule::new("completed", "已完成", |d: &Document| d.status_is("completed")),
                StackRule::new("unread", "未读", |d: &Document| !d.viewed),
            ],
            FALLBACK_STACK_KEY,
        )
    }

    #[test]
    fn test_empty_input_materializes_every_stack() {
        let stacks = categorizer().categorize(&[]);
        assert_eq!(stacks.len(), 4);
        for key in ["needs_action", "completed", "unread", FALLBACK_STACK_KEY] {
            assert!(stacks.get(key).is_some_and(|stack| stack.is_empty()));
        }
    }

    #[test]
    fn test_first_match_wins() {
        // 同时命中"待处理"和"未读"，只进优先级更高的"待处理"
        let documents = vec![doc("d1", Some("pending"), Some("high"), false)];
        let stacks = categorizer().categorize(&documents);

        assert_eq!(stacks["needs_action"].len(), 1);
        assert!(stacks["unread"].is_empty());
    }

    #[test]
    fn test_unmatched_goes_to_fallback() {
        let documents = vec![doc("d1", Some("archived"), Some("low"), true)];
        let stacks = categorizer().categorize(&documents);

        assert_eq!(stacks[FALLBACK_STACK_KEY].len(), 1);
        assert!(stacks["needs_action"].is_empty());
        assert!(stacks["completed"].is_empty());
        assert!(stacks["unread"].is_empty());
    }

    #[test]
    fn test_stable_partition_keeps_input_order() {
        let documents = vec![
            doc("d1", None, None, false),
            doc("d2", Some("completed"), None, true),
            doc("d3", None, None, false),
            doc("d4", None, None, false),
        ];
        let stacks = categorizer().categorize(&documents);

        let unread_ids: Vec<&str> = stacks["unread"].iter().map(|d| d.id.as_str()).collect();
        assert_eq!(unread_ids, vec!["d1", "d3", "d4"]);
    }

    #[test]
    fn test_categorize_is_idempotent() {
        let documents = vec![
            doc("d1", Some("completed"), Some("high"), true),
            doc("d2", None, Some("high"), false),
            doc("d3", Some("archived"), None, true),
        ];
        let categorizer = categorizer();
        let first = categorizer.categorize(&documents);
        let second = categorizer.categorize(&documents);

        assert_eq!(first.len(), second.len());
        for (key, stack) in &first {
            let other: Vec<&str> = second[key].iter().map(|d| d.id.as_str()).collect();
            let this: Vec<&str> = stack.iter().map(|d| d.id.as_str()).collect();
            assert_eq!(this, other);
        }
    }

    #[test]
    fn test_every_document_lands_in_exactly_one_stack() {
        let documents = vec![
            doc("d1", Some("completed"), Some("high"), false),
            doc("d2", None, None, false),
            doc("d3", Some("archived"), None, true),
        ];
        let stacks = categorizer().categorize(&documents);

        let total: usize = stacks.values().map(Vec::len).sum();
        assert_eq!(total, documents.len());
    }

    #[test]
    fn test_default_rules_cover_six_stacks() {
        let categorizer = DocumentCategorizer::with_default_rules();
        let keys = categorizer.stack_keys();
        assert_eq!(
            keys,
            vec![
                "needs_action",
                "completed",
                "in_review",
                "unread",
                "recent",
                FALLBACK_STACK_KEY
            ]
        );
    }
}
