//! 编排层
//!
//! 驱动一次完整的录入流程：加载候选人 → 建立会话 → 逐个录入。
//! 任一候选人失败时丢弃当前会话、重新登录后继续处理下一个；
//! 失败的候选人在本次运行内不再重试。

use std::future::Future;
use std::path::Path;

use tracing::{error, info, warn};

use crate::browser::{EntrySession, HrmAutomator};
use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::models::Candidate;
use crate::services::{data_provider, resume_generator};
use crate::utils::fs::{cleanup_directory, ensure_dir};

/// CSV 下载目录（数据源是 URL 时使用）
const DOWNLOAD_DIR: &str = "output/data";

/// 一次运行的统计结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// 加载到的候选人总数
    pub total: usize,
    /// 成功录入数
    pub success: usize,
    /// 失败候选人的显示名称，按发生顺序
    pub failed: Vec<String>,
}

/// 应用主结构
pub struct App {
    config: Config,
    credentials: Credentials,
}

impl App {
    pub fn new(config: Config, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// 运行完整流程
    ///
    /// 部分候选人失败不影响返回：失败只进入统计和日志。
    /// 致命错误（数据源不可用、首个会话无法建立）记录后提前结束，
    /// 同样以汇总收尾。
    pub async fn run(&self) -> RunStats {
        log_startup();

        let resume_dir = Path::new(&self.config.resume_output_dir);
        if let Err(e) = self.setup_environment(resume_dir) {
            error!("环境准备失败，终止运行: {}", e);
            let stats = RunStats::default();
            log_summary(&stats);
            return stats;
        }

        info!("读取候选人数据源: {}", self.config.candidates_csv_url);
        let candidates = match data_provider::fetch_candidates(
            &self.config.candidates_csv_url,
            Path::new(DOWNLOAD_DIR),
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("加载候选人失败，终止运行: {}", e);
                let stats = RunStats::default();
                log_summary(&stats);
                return stats;
            }
        };

        if candidates.is_empty() {
            warn!("⚠️ 没有待处理的候选人，程序结束");
            let stats = RunStats::default();
            log_summary(&stats);
            return stats;
        }
        info!("共 {} 个候选人待处理", candidates.len());

        let config = self.config.clone();
        let credentials = self.credentials.clone();
        let new_session = move || {
            let config = config.clone();
            let credentials = credentials.clone();
            async move {
                let mut automator = HrmAutomator::open(&config).await?;
                automator
                    .login(&credentials.username, &credentials.password)
                    .await?;
                Ok(automator)
            }
        };

        let stats = run_entry_loop(new_session, &candidates, resume_dir).await;

        log_summary(&stats);
        if let Err(e) = cleanup_directory(resume_dir) {
            error!("收尾清理失败: {}", e);
        }
        stats
    }

    /// 准备输出目录并清理上次运行的残留
    fn setup_environment(&self, resume_dir: &Path) -> Result<()> {
        info!("准备运行环境...");
        ensure_dir(resume_dir)?;
        cleanup_directory(resume_dir)?;
        info!("环境准备完成");
        Ok(())
    }
}

/// 逐个录入候选人
///
/// 会话由 `new_session` 工厂建立（含登录）。任一步骤失败后
/// 当前会话被丢弃，重建新会话后继续下一个候选人；
/// 首个会话或重建会话失败视为致命错误，记录后提前收尾。
pub async fn run_entry_loop<S, F, Fut>(
    new_session: F,
    candidates: &[Candidate],
    resume_dir: &Path,
) -> RunStats
where
    S: EntrySession,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<S>>,
{
    let mut stats = RunStats {
        total: candidates.len(),
        ..Default::default()
    };

    let mut session = match new_session().await {
        Ok(session) => session,
        Err(e) => {
            error!("无法建立首个会话，终止运行: {}", e);
            return stats;
        }
    };

    for (index, candidate) in candidates.iter().enumerate() {
        let name = candidate.display_name();
        info!(
            "处理候选人 {}/{}: {}",
            index + 1,
            stats.total,
            name
        );

        match process_candidate(&mut session, candidate, resume_dir).await {
            Ok(()) => {
                info!("✅ 候选人录入成功: {}", name);
                stats.success += 1;
            }
            Err(e) => {
                error!("❌ 候选人录入失败: {}: {}", name, e);
                stats.failed.push(name);

                // 远端 UI 可能停在半填写状态，丢弃整个会话重新登录
                session.close().await;
                info!("重新登录以恢复...");
                session = match new_session().await {
                    Ok(session) => session,
                    Err(e) => {
                        error!("会话重建失败，终止运行: {}", e);
                        return stats;
                    }
                };
            }
        }
    }

    session.close().await;
    stats
}

/// 单个候选人的完整步骤序列
async fn process_candidate<S: EntrySession>(
    session: &mut S,
    candidate: &Candidate,
    resume_dir: &Path,
) -> Result<()> {
    session.open_module().await?;
    session.open_create_form().await?;
    let resume_path = resume_generator::generate_resume_file(candidate, resume_dir)?;
    session.fill_form(candidate, &resume_path).await?;
    session.submit().await
}

// ========== 日志辅助函数 ==========

fn log_startup() {
    info!("{}", "=".repeat(30));
    info!("🚀 候选人录入流程启动");
    info!(
        "开始时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(30));
}

fn log_summary(stats: &RunStats) {
    info!("{}", "=".repeat(30));
    info!("📊 录入流程结束 - 汇总");
    info!("{}", "=".repeat(30));
    info!("候选人总数: {}", stats.total);
    info!("✅ 成功: {}", stats.success);
    info!("❌ 失败: {}", stats.failed.len());
    if !stats.failed.is_empty() {
        warn!("失败候选人列表:");
        for name in &stats.failed {
            warn!("- {}", name);
        }
    }
    info!("{}", "=".repeat(30));
}
