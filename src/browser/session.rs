//! 浏览器会话的创建与释放

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::error::{AppError, Result};

/// 启动浏览器并创建空白页面
///
/// CDP 事件流在后台任务中排空；启动后短暂等待浏览器状态同步。
pub async fn launch_browser(headless: bool) -> Result<(Browser, Page)> {
    info!(
        "🚀 启动浏览器（{}模式）...",
        if headless { "无头" } else { "有头" }
    );

    let mut builder = BrowserConfig::builder();
    if headless {
        // 无头模式下固定窗口尺寸，避免响应式布局隐藏控件
        builder = builder.new_headless_mode().window_size(1920, 1080);
    } else {
        builder = builder.with_head();
    }
    let config = builder
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
        ])
        .build()
        .map_err(|e| AppError::Config(format!("浏览器配置失败: {}", e)))?;

    let (browser, mut handler) = Browser::launch(config).await?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await?;
    debug!("空白页面创建成功");

    Ok((browser, page))
}
