//! # HRM Candidate Entry
//!
//! 一个浏览器驱动的候选人录入机器人：
//! 从 CSV 数据源读取候选人记录，为每人生成纯文本简历，
//! 然后驱动 OrangeHRM 的网页 UI 创建候选人并附加简历。
//!
//! ## 架构设计
//!
//! 自下而上分为四层：
//!
//! ### ① 业务能力层（Services）
//! - `services/data_provider` - 加载候选人 CSV（本地路径或 URL）
//! - `services/resume_generator` - 生成单个候选人的简历文件
//!
//! ### ② 浏览器层（Browser）
//! - `browser/session` - 浏览器会话的创建与释放
//! - `browser/locators` - 目标站点的定位器映射（与步骤逻辑分离）
//! - `browser/automator` - UI 会话控制器：登录 → 导航 → 填表 → 保存
//!
//! ### ③ 编排层（Orchestration）
//! - `app` - 顺序驱动每个候选人，失败时丢弃会话重新登录
//!
//! ### ④ 基础设施（Infrastructure）
//! - `config` / `error` / `logger` / `utils`

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::{run_entry_loop, App, RunStats};
pub use browser::{EntrySession, HrmAutomator, Locator, SessionState};
pub use config::{Config, Credentials};
pub use error::{AppError, Result};
pub use models::Candidate;
