//! 上传请求校验服务 - 业务能力层
//!
//! 只负责"上传前校验"能力：纯校验、无副作用，
//! 任何一项不通过都在发起网络请求之前直接返回。
//!
//! 校验顺序固定：
//! 1. 负载存在（非空文件或非空 URL）
//! 2. 至少选择一个目标部门
//! 3. 用户已认证且有稳定 ID
//! 4. 文件类型命中允许列表（MIME 或扩展名任一命中即可）
//! 5. 文件大小不超过上限
//! 6. URL 可解析为合法的绝对地址

use phf::phf_set;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{AuthUser, Priority, UploadPayload, ValidatedRequest};

/// 允许上传的 MIME 类型（文档 + 图片）
static ALLOWED_MIME_TYPES: phf::Set<&'static str> = phf_set! {
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
};

/// 上传请求校验器
///
/// 职责：
/// - 把表单输入折叠为一份只读的 `ValidatedRequest`
/// - 目标列表有序去重，保证后续顺序处理可复现
/// - 不发起网络请求，不改动任何输入
pub struct TargetSetResolver {
    max_file_size: u64,
}

impl TargetSetResolver {
    /// 创建新的校验器
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// 校验一次上传请求
    pub fn resolve(
        &self,
        payload: Option<&UploadPayload>,
        destinations: &[String],
        user: Option<&AuthUser>,
        priority: Priority,
    ) -> Result<ValidatedRequest, ValidationError> {
        // 1. 负载必须存在
        let payload = payload.ok_or(ValidationError::MissingPayload)?;
        if let UploadPayload::Url(url) = payload {
            if url.trim().is_empty() {
                return Err(ValidationError::MissingPayload);
            }
        }

        // 2. 至少一个目标
        if destinations.is_empty() {
            return Err(ValidationError::NoDestinationSelected);
        }

        // 3. 用户必须已认证且有稳定 ID
        let user = user.ok_or(ValidationError::Unauthenticated)?;
        if user.id.trim().is_empty() {
            return Err(ValidationError::Unauthenticated);
        }

        // 4/5/6. 负载本体检查
        match payload {
            UploadPayload::File(file) => {
                if !ALLOWED_MIME_TYPES.contains(file.mime_type.as_str())
                    && !extension_allowed(&file.file_name)
                {
                    return Err(ValidationError::UnsupportedType {
                        name: file.file_name.clone(),
                    });
                }
                if file.size > self.max_file_size {
                    return Err(ValidationError::PayloadTooLarge {
                        name: file.file_name.clone(),
                        size: file.size,
                        max: self.max_file_size,
                    });
                }
            }
            UploadPayload::Url(url) => {
                // 相对地址一律拒绝
                if reqwest::Url::parse(url).is_err() {
                    return Err(ValidationError::InvalidUrl { url: url.clone() });
                }
            }
        }

        Ok(ValidatedRequest {
            payload: payload.clone(),
            destinations: dedup_preserving_order(destinations),
            priority,
            user_id: user.id.clone(),
        })
    }
}

/// 扩展名允许列表（大小写不敏感），与 MIME 列表互为兜底
fn extension_allowed(file_name: &str) -> bool {
    if let Ok(re) = Regex::new(r"(?i)\.(pdf|doc|docx|xls|xlsx|jpg|jpeg|png|gif|bmp|webp)$") {
        re.is_match(file_name)
    } else {
        false
    }
}

/// 去重但保持首次出现的顺序
fn dedup_preserving_order(destinations: &[String]) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::new();
    for destination in destinations {
        if !deduped.contains(destination) {
            deduped.push(destination.clone());
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilePayload;

    fn resolver() -> TargetSetResolver {
        TargetSetResolver::new(10 * 1024 * 1024)
    }

    fn file(name: &str, mime: &str, size: u64) -> UploadPayload {
        UploadPayload::File(FilePayload {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            size,
            content: Vec::new(),
        })
    }

    fn depts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn user() -> AuthUser {
        AuthUser::new("u1")
    }

    #[test]
    fn test_missing_payload() {
        let err = resolver()
            .resolve(None, &depts(&["HR"]), Some(&user()), Priority::Normal)
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingPayload);

        // 空 URL 等同于没有负载
        let blank = UploadPayload::Url("   ".to_string());
        let err = resolver()
            .resolve(Some(&blank), &depts(&["HR"]), Some(&user()), Priority::Normal)
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingPayload);
    }

    #[test]
    fn test_no_destination_selected() {
        let payload = file("a.pdf", "application/pdf", 10);
        let err = resolver()
            .resolve(Some(&payload), &[], Some(&user()), Priority::Normal)
            .unwrap_err();
        assert_eq!(err, ValidationError::NoDestinationSelected);
    }

    #[test]
    fn test_unauthenticated() {
        let payload = file("a.pdf", "application/pdf", 10);
        let err = resolver()
            .resolve(Some(&payload), &depts(&["HR"]), None, Priority::Normal)
            .unwrap_err();
        assert_eq!(err, ValidationError::Unauthenticated);

        let anonymous = AuthUser::new("");
        let err = resolver()
            .resolve(
                Some(&payload),
                &depts(&["HR"]),
                Some(&anonymous),
                Priority::Normal,
            )
            .unwrap_err();
        assert_eq!(err, ValidationError::Unauthenticated);
    }

    #[test]
    fn test_unsupported_type() {
        let payload = file("evil.exe", "application/x-msdownload", 10);
        let err = resolver()
            .resolve(Some(&payload), &depts(&["HR"]), Some(&user()), Priority::Normal)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedType {
                name: "evil.exe".to_string()
            }
        );
    }

    #[test]
    fn test_extension_rescues_unknown_mime() {
        // MIME 未命中但扩展名命中，放行
        let payload = file("扫描件.PDF", "application/octet-stream", 10);
        assert!(resolver()
            .resolve(Some(&payload), &depts(&["HR"]), Some(&user()), Priority::Normal)
            .is_ok());
    }

    #[test]
    fn test_payload_too_large() {
        let limit = 10 * 1024 * 1024;
        let payload = file("big.pdf", "application/pdf", limit + 1);
        let err = resolver()
            .resolve(Some(&payload), &depts(&["HR"]), Some(&user()), Priority::Normal)
            .unwrap_err();
        assert!(matches!(err, ValidationError::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_invalid_url() {
        let payload = UploadPayload::Url("not a url".to_string());
        let err = resolver()
            .resolve(Some(&payload), &depts(&["HR"]), Some(&user()), Priority::Normal)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));

        // 相对地址同样拒绝
        let payload = UploadPayload::Url("/docs/a.pdf".to_string());
        assert!(resolver()
            .resolve(Some(&payload), &depts(&["HR"]), Some(&user()), Priority::Normal)
            .is_err());
    }

    #[test]
    fn test_valid_url_passes() {
        let payload = UploadPayload::Url("https://example.com/document.pdf".to_string());
        let request = resolver()
            .resolve(Some(&payload), &depts(&["HR"]), Some(&user()), Priority::High)
            .unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.priority, Priority::High);
    }

    #[test]
    fn test_destinations_deduped_in_order() {
        let payload = file("a.pdf", "application/pdf", 10);
        let request = resolver()
            .resolve(
                Some(&payload),
                &depts(&["HR", "Finance", "HR", "Engineering", "Finance"]),
                Some(&user()),
                Priority::Normal,
            )
            .unwrap();
        assert_eq!(request.destinations, depts(&["HR", "Finance", "Engineering"]));
    }
}
