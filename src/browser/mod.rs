//! 浏览器自动化层
//!
//! - `session`: 浏览器会话的创建与释放
//! - `locators`: 目标站点的定位器映射
//! - `automator`: 步骤操作的状态机实现

pub mod automator;
pub mod locators;
pub mod session;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Candidate;

pub use automator::{HrmAutomator, SessionState};
pub use locators::Locator;

/// 编排层驱动的单候选人录入步骤
///
/// 约定：任何步骤返回错误后，会话已被实现方强制关闭，
/// 不允许继续调用其它步骤，只能丢弃并重建。
#[async_trait]
pub trait EntrySession: Send {
    /// 进入目标模块（候选人列表页）
    async fn open_module(&mut self) -> Result<()>;

    /// 打开新建候选人表单
    async fn open_create_form(&mut self) -> Result<()>;

    /// 填写表单并附加简历文件
    async fn fill_form(&mut self, candidate: &Candidate, resume_path: &Path) -> Result<()>;

    /// 提交表单并等待保存确认
    async fn submit(&mut self) -> Result<()>;

    /// 无条件释放会话（幂等）
    async fn close(&mut self);
}
