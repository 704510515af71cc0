use anyhow::Result;
use std::sync::Arc;

use doc_dashboard_client::utils::logger;
use doc_dashboard_client::{ApiClient, AuthUser, Config, Dashboard, UiPrefs};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置与界面偏好
    let config = Config::from_env();
    let prefs = UiPrefs::load(&config.ui_prefs_file)?;

    let user = AuthUser::new(config.user_id.clone());
    let client = Arc::new(ApiClient::new(&config));

    // 初始化并运行仪表盘会话
    let mut dashboard = Dashboard::initialize(config.clone(), user, client)?;
    dashboard.run().await?;

    // 退出边界：保存界面偏好
    prefs.save(&config.ui_prefs_file)?;

    Ok(())
}
