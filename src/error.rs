//! 应用程序错误类型
//!
//! 错误分类决定了编排层的恢复策略：
//! - 数据源的行级错误在 `data_provider` 内部恢复（跳过该行）
//! - UI / 文件错误由编排层恢复（丢弃会话并重建）
//! - 首次建立会话失败、清理失败为致命错误（记录后终止运行）

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源文件不存在
    #[error("数据源不存在: {path}")]
    NotFound { path: String },

    /// 数据源格式错误（超出行级跳过容忍范围）
    #[error("数据源格式错误: {0}")]
    SourceFormat(#[from] csv::Error),

    /// CSV 下载失败
    #[error("下载数据源失败 ({url}): {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 登录未在超时时间内到达已认证标记
    #[error("登录失败: {reason}")]
    AuthenticationFailed { reason: String },

    /// 页面导航步骤的目标控件或确认标记未出现
    #[error("导航失败 ({step}): {reason}")]
    NavigationFailed { step: &'static str, reason: String },

    /// 表单交互步骤的目标控件或确认标记未出现
    #[error("表单操作失败 ({step}): {reason}")]
    FormInteractionFailed { step: &'static str, reason: String },

    /// 本地文件写入失败
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 浏览器协议层错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// 配置错误（缺少必需的环境变量等）
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    /// 创建文件操作错误
    pub fn io_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建导航失败错误
    pub fn navigation_failed(step: &'static str, reason: impl Into<String>) -> Self {
        AppError::NavigationFailed {
            step,
            reason: reason.into(),
        }
    }

    /// 创建表单操作失败错误
    pub fn form_failed(step: &'static str, reason: impl Into<String>) -> Self {
        AppError::FormInteractionFailed {
            step,
            reason: reason.into(),
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
