use crate::error::{AppError, AppResult};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 地址
    pub api_base_url: String,
    /// 当前用户 ID（演示入口使用；正式壳层从认证上下文注入）
    pub user_id: String,
    /// 相邻目标之间的上传间隔（毫秒）
    pub upload_delay_ms: u64,
    /// 单个文件大小上限（字节）
    pub max_file_size: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 界面偏好文件（暗色模式等）
    pub ui_prefs_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://kmrlsih-backend.onrender.com".to_string(),
            user_id: "demo-user".to_string(),
            upload_delay_ms: 500,
            max_file_size: 10 * 1024 * 1024,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            ui_prefs_file: "ui_prefs.toml".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            user_id: std::env::var("DASHBOARD_USER_ID").unwrap_or(default.user_id),
            upload_delay_ms: std::env::var("UPLOAD_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.upload_delay_ms),
            max_file_size: std::env::var("MAX_FILE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_file_size),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            ui_prefs_file: std::env::var("UI_PREFS_FILE").unwrap_or(default.ui_prefs_file),
        }
    }
}

/// 界面偏好
///
/// 跨会话持久化的客户端状态，目前只有暗色模式一项。
/// 在启动边界显式加载、退出边界显式保存，不做进程内全局量
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UiPrefs {
    /// 暗色模式
    #[serde(default)]
    pub dark_mode: bool,
}

impl UiPrefs {
    /// 启动时加载；文件不存在时使用默认值
    pub fn load(path: &str) -> AppResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(AppError::file_read_failed(path, err)),
        };

        let prefs: UiPrefs = toml::from_str(&content)?;
        Ok(prefs)
    }

    /// 退出时保存
    pub fn save(&self, path: &str) -> AppResult<()> {
        let content = toml::to_string(self).map_err(|e| AppError::Other(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| AppError::file_write_failed(path, e))?;
        Ok(())
    }
}
