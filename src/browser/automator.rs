//! UI 会话控制器
//!
//! 持有唯一的浏览器会话，按固定顺序暴露步骤操作：
//! 登录 → 进入模块 → 打开表单 → 填写 → 保存。
//! 每个步骤都是 前置状态 → 动作 → 有界等待后置标记 的三段式；
//! 任何步骤失败都统一处理：记录、强制关闭会话、向上传播，
//! 是否重试完全交给调用方决定。

use std::path::Path;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::{Browser, Element, Page};
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, error, info};

use crate::browser::locators::{self, Locator};
use crate::browser::session::launch_browser;
use crate::browser::EntrySession;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Candidate;

/// 有界等待的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 附加简历后的固定安定延迟。
/// 目标 DOM 没有可供轮询的"上传已确认"信号，只能等一个固定时长。
const UPLOAD_SETTLE: Duration = Duration::from_secs(2);

/// 会话状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Authenticated,
    OnModulePage,
    OnCreateForm,
    FormFilled,
    Saved,
    /// 终态，任何状态都可达
    Closed,
}

/// OrangeHRM 自动化会话
///
/// 同一时刻最多存在一个实例；任何步骤失败后实例不再复用，
/// 由编排层丢弃并重建。
pub struct HrmAutomator {
    browser: Option<Browser>,
    page: Page,
    state: SessionState,
    base_url: String,
    implicit_wait: Duration,
    explicit_wait: Duration,
}

impl HrmAutomator {
    /// 启动浏览器会话
    pub async fn open(config: &Config) -> Result<Self> {
        let (browser, page) = launch_browser(config.headless).await?;
        Ok(Self {
            browser: Some(browser),
            page,
            state: SessionState::Uninitialized,
            base_url: config.base_url.clone(),
            implicit_wait: Duration::from_secs(config.implicit_wait_secs),
            explicit_wait: Duration::from_secs(config.explicit_wait_secs),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 登录目标应用
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        info!("正在登录...");
        match self.try_login(username, password).await {
            Ok(()) => {
                self.state = SessionState::Authenticated;
                info!("✅ 登录成功");
                Ok(())
            }
            Err(e) => self.fail_step(e).await,
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<()> {
        self.page.goto(&self.base_url).await?;

        let username_field = self
            .wait_for(&locators::username_input(), self.explicit_wait)
            .await
            .ok_or_else(|| AppError::AuthenticationFailed {
                reason: "未找到用户名输入框".to_string(),
            })?;
        username_field.click().await?;
        username_field.type_str(username).await?;

        let password_field = self
            .wait_for(&locators::password_input(), self.implicit_wait)
            .await
            .ok_or_else(|| AppError::AuthenticationFailed {
                reason: "未找到密码输入框".to_string(),
            })?;
        password_field.click().await?;
        password_field.type_str(password).await?;

        let login_button = self
            .wait_for(&locators::login_button(), self.implicit_wait)
            .await
            .ok_or_else(|| AppError::AuthenticationFailed {
                reason: "未找到登录按钮".to_string(),
            })?;
        login_button.click().await?;

        self.wait_for(&locators::dashboard_marker(), self.explicit_wait)
            .await
            .ok_or_else(|| AppError::AuthenticationFailed {
                reason: "超时未出现登录后的仪表盘标记".to_string(),
            })?;
        Ok(())
    }

    /// 导航到 Recruitment 模块
    pub async fn navigate_to_recruitment(&mut self) -> Result<()> {
        info!("导航到 Recruitment 模块");
        match self.try_navigate_to_recruitment().await {
            Ok(()) => {
                self.state = SessionState::OnModulePage;
                Ok(())
            }
            Err(e) => self.fail_step(e).await,
        }
    }

    async fn try_navigate_to_recruitment(&self) -> Result<()> {
        let link = self
            .wait_for(&locators::recruitment_nav_link(), self.explicit_wait)
            .await
            .ok_or_else(|| {
                AppError::navigation_failed("open_module", "未找到 Recruitment 导航入口")
            })?;
        link.click().await?;

        self.wait_for(&locators::records_header(), self.explicit_wait)
            .await
            .ok_or_else(|| {
                AppError::navigation_failed("open_module", "超时未出现候选人列表标记")
            })?;
        Ok(())
    }

    /// 点击 Add 打开新建候选人表单
    pub async fn click_add_candidate(&mut self) -> Result<()> {
        info!("打开新建候选人表单");
        match self.try_click_add_candidate().await {
            Ok(()) => {
                self.state = SessionState::OnCreateForm;
                Ok(())
            }
            Err(e) => self.fail_step(e).await,
        }
    }

    async fn try_click_add_candidate(&self) -> Result<()> {
        let add_button = self
            .wait_for(&locators::add_button(), self.explicit_wait)
            .await
            .ok_or_else(|| AppError::navigation_failed("open_create_form", "未找到 Add 按钮"))?;
        add_button.click().await?;

        self.wait_for(&locators::add_candidate_header(), self.explicit_wait)
            .await
            .ok_or_else(|| {
                AppError::navigation_failed("open_create_form", "超时未出现表单标题")
            })?;
        Ok(())
    }

    /// 填写候选人表单并附加简历文件
    pub async fn fill_candidate_form(
        &mut self,
        candidate: &Candidate,
        resume_path: &Path,
    ) -> Result<()> {
        info!("填写候选人表单: {}", candidate.display_name());
        match self.try_fill_candidate_form(candidate, resume_path).await {
            Ok(()) => {
                self.state = SessionState::FormFilled;
                Ok(())
            }
            Err(e) => self.fail_step(e).await,
        }
    }

    async fn try_fill_candidate_form(
        &self,
        candidate: &Candidate,
        resume_path: &Path,
    ) -> Result<()> {
        self.type_into(&locators::first_name_input(), &candidate.first_name, "First Name")
            .await?;
        self.type_into(&locators::last_name_input(), &candidate.last_name, "Last Name")
            .await?;

        // 职位是单选下拉框，按可见文本精确匹配；选项不存在时等待超时即失败
        let dropdown = self
            .wait_for(&locators::vacancy_dropdown(), self.implicit_wait)
            .await
            .ok_or_else(|| AppError::form_failed("fill_form", "未找到职位下拉框"))?;
        dropdown.click().await?;

        let option_locator = locators::vacancy_option(&candidate.vacancy);
        let option = self
            .wait_for(&option_locator, self.explicit_wait)
            .await
            .ok_or_else(|| {
                AppError::form_failed(
                    "fill_form",
                    format!("下拉框中不存在职位选项: {}", candidate.vacancy),
                )
            })?;
        option.click().await?;

        self.type_into(&locators::email_input(), &candidate.email, "Email")
            .await?;
        self.type_into(
            &locators::contact_input(),
            &candidate.contact_number,
            "Contact Number",
        )
        .await?;

        self.attach_resume(resume_path).await?;
        Ok(())
    }

    /// 通过文件输入控件附加简历（需要绝对路径）
    async fn attach_resume(&self, resume_path: &Path) -> Result<()> {
        let file_input = self
            .wait_for(&locators::resume_file_input(), self.implicit_wait)
            .await
            .ok_or_else(|| AppError::form_failed("fill_form", "未找到简历文件输入控件"))?;

        let absolute_path = resume_path
            .canonicalize()
            .map_err(|e| AppError::io_failed(resume_path.display().to_string(), e))?;
        debug!("附加简历文件: {}", absolute_path.display());

        let params = SetFileInputFilesParams::builder()
            .file(absolute_path.to_string_lossy())
            .backend_node_id(file_input.backend_node_id)
            .build()
            .map_err(|e| AppError::form_failed("fill_form", e))?;
        self.page.execute(params).await?;

        // 等待页面登记上传
        sleep(UPLOAD_SETTLE).await;
        Ok(())
    }

    /// 保存候选人
    pub async fn save_candidate(&mut self) -> Result<()> {
        info!("保存候选人...");
        match self.try_save_candidate().await {
            Ok(()) => {
                self.state = SessionState::Saved;
                info!("✅ 候选人保存成功");
                Ok(())
            }
            Err(e) => self.fail_step(e).await,
        }
    }

    async fn try_save_candidate(&self) -> Result<()> {
        let save_button = self
            .wait_for(&locators::save_button(), self.implicit_wait)
            .await
            .ok_or_else(|| AppError::form_failed("submit", "未找到保存按钮"))?;
        save_button.click().await?;

        self.wait_for(&locators::application_stage_marker(), self.explicit_wait)
            .await
            .ok_or_else(|| AppError::form_failed("submit", "超时未出现保存成功标记"))?;
        Ok(())
    }

    /// 无条件释放浏览器会话（幂等）
    pub async fn quit(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            info!("关闭浏览器会话");
            if let Err(e) = browser.close().await {
                error!("关闭浏览器失败: {}", e);
            }
            let _ = browser.wait().await;
        }
        self.state = SessionState::Closed;
    }

    /// 步骤失败的统一处理：记录、关闭会话、向上传播
    async fn fail_step(&mut self, e: AppError) -> Result<()> {
        error!("❌ 步骤失败: {}", e);
        self.quit().await;
        Err(e)
    }

    /// 在输入控件中键入文本
    async fn type_into(&self, locator: &Locator, text: &str, label: &str) -> Result<()> {
        let element = self
            .wait_for(locator, self.implicit_wait)
            .await
            .ok_or_else(|| {
                AppError::form_failed("fill_form", format!("未找到 {} 输入框", label))
            })?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// 有界等待：轮询定位器直到元素出现或超时
    ///
    /// 超时返回 `None`，由调用步骤映射为各自的错误类型。
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Option<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.find(locator).await {
                return Some(element);
            }
            if Instant::now() >= deadline {
                debug!("等待元素超时: {}", locator);
                return None;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn find(&self, locator: &Locator) -> std::result::Result<Element, chromiumoxide::error::CdpError> {
        match locator {
            Locator::Css(selector) => self.page.find_element(selector.as_str()).await,
            Locator::XPath(expression) => self.page.find_xpath(expression.as_str()).await,
        }
    }
}

#[async_trait]
impl EntrySession for HrmAutomator {
    async fn open_module(&mut self) -> Result<()> {
        self.navigate_to_recruitment().await
    }

    async fn open_create_form(&mut self) -> Result<()> {
        self.click_add_candidate().await
    }

    async fn fill_form(&mut self, candidate: &Candidate, resume_path: &Path) -> Result<()> {
        self.fill_candidate_form(candidate, resume_path).await
    }

    async fn submit(&mut self) -> Result<()> {
        self.save_candidate().await
    }

    async fn close(&mut self) {
        self.quit().await;
    }
}
