//! 用户数据模型
//!
//! 认证与会话机制由外部壳层负责，这里只需要一个稳定的用户标识

/// 已认证用户
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuthUser {
    /// 用户 ID
    #[serde(alias = "user_id")]
    pub id: String,

    /// 显示名称
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthUser {
    /// 创建新的用户
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}
