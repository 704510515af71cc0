//! 后端 API 客户端 - 基础设施层
//!
//! 封装所有与仪表盘后端相关的 HTTP 调用逻辑

use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::clients::{DocumentStore, UploadTransport};
use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::models::{Document, Priority, UploadPayload};

/// 后端 API 客户端
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 把 reqwest 错误折叠为应用错误
    ///
    /// 连接失败与超时单独归为"服务器无响应"
    fn request_error(path: &str, err: reqwest::Error) -> AppError {
        if err.is_connect() || err.is_timeout() {
            return AppError::Api(ApiError::NoResponse {
                endpoint: path.to_string(),
            });
        }
        AppError::api_request_failed(path, err)
    }

    /// 从后端错误响应体中提取 detail 字段
    fn extract_detail(body: &JsonValue) -> Option<String> {
        body.get("detail")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// 检查响应状态；错误状态折叠为带 detail 的 AppError
    async fn check_status(path: &str, response: reqwest::Response) -> Result<JsonValue> {
        let status = response.status();
        let body: JsonValue = response.json().await.unwrap_or(JsonValue::Null);

        if !status.is_success() {
            let detail = Self::extract_detail(&body);
            return Err(AppError::api_bad_status(path, status.as_u16(), detail).into());
        }

        Ok(body)
    }

    /// 后端显式返回 success = false 也算失败
    fn check_success_flag(body: JsonValue) -> Result<JsonValue> {
        if body.get("success").and_then(|v| v.as_bool()) == Some(false) {
            let message = body
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("上传失败")
                .to_string();
            anyhow::bail!(message);
        }
        Ok(body)
    }
}

#[async_trait]
impl UploadTransport for ApiClient {
    async fn upload_one(
        &self,
        payload: &UploadPayload,
        destination: &str,
        priority: Priority,
        user_id: &str,
    ) -> Result<JsonValue> {
        let response = match payload {
            UploadPayload::File(file) => {
                let path = "/documents/file";
                debug!(
                    "上传文件 {} → {} ({} 字节)",
                    file.file_name, destination, file.size
                );

                let mime_type = if file.mime_type.is_empty() {
                    "application/octet-stream"
                } else {
                    &file.mime_type
                };

                // 每次调用都新建表单，不跨目标复用
                let part = multipart::Part::bytes(file.content.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(mime_type)
                    .map_err(|e| AppError::api_request_failed(path, e))?;
                let form = multipart::Form::new()
                    .part("file", part)
                    .text("user_id", user_id.to_string())
                    .text("dept_name", destination.to_string())
                    .text("priority", priority.as_str());

                let response = self
                    .client
                    .post(self.endpoint(path))
                    .multipart(form)
                    .send()
                    .await
                    .map_err(|e| Self::request_error(path, e))?;
                Self::check_status(path, response).await?
            }
            UploadPayload::Url(url) => {
                let path = "/documents/url";
                debug!("上传链接 {} → {}", url, destination);

                let body = json!({
                    "user_id": user_id,
                    "url": url,
                    "dept_name": destination,
                    "priority": priority.as_str(),
                });

                let response = self
                    .client
                    .post(self.endpoint(path))
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Self::request_error(path, e))?;
                Self::check_status(path, response).await?
            }
        };

        Self::check_success_flag(response)
    }
}

#[async_trait]
impl DocumentStore for ApiClient {
    async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>> {
        let path = "/documents/listdocs";

        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(|e| Self::request_error(path, e))?;
        let body = Self::check_status(path, response).await?;

        parse_documents(body)
    }

    async fn mark_viewed(&self, user_id: &str, doc_id: &str) -> Result<()> {
        let path = "/profile/viewed";

        let body = json!({
            "user_id": user_id,
            "doc_id": doc_id,
        });

        let response = self
            .client
            .post(self.endpoint(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::request_error(path, e))?;
        Self::check_status(path, response).await?;

        Ok(())
    }
}

/// 解释文档列表响应
///
/// 后端可能返回三种形状：文档数组、`{ "data": [...] }` 包装、
/// 或 `{ "error": ... }` 错误对象。错误对象与未知形状都折叠为 Err，
/// 由调用方按"零文档 + 暴露错误"处理
pub fn parse_documents(body: JsonValue) -> Result<Vec<Document>> {
    // `data` 包装优先剥掉
    let wrapped = body.get("data").filter(|data| !data.is_null()).cloned();
    let documents = match wrapped {
        Some(data) => data,
        None => body,
    };

    if let Some(error) = documents.get("error") {
        let message = error
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string());
        anyhow::bail!(message);
    }

    if documents.is_array() {
        let parsed: Vec<Document> = serde_json::from_value(documents)?;
        return Ok(parsed);
    }

    anyhow::bail!("文档列表格式无效");
}
