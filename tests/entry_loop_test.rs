//! 编排层场景测试
//!
//! 用内存中的模拟会话驱动录入循环，验证成功计数、
//! 失败记录以及"失败后丢弃会话重新登录"的恢复行为。

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use hrm_candidate_entry::app::{run_entry_loop, App, RunStats};
use hrm_candidate_entry::browser::EntrySession;
use hrm_candidate_entry::config::{Config, Credentials};
use hrm_candidate_entry::error::{AppError, Result};
use hrm_candidate_entry::models::Candidate;

/// 模拟会话：在指定候选人的填表步骤上失败
struct MockSession {
    fail_fill_for: Option<String>,
}

#[async_trait]
impl EntrySession for MockSession {
    async fn open_module(&mut self) -> Result<()> {
        Ok(())
    }

    async fn open_create_form(&mut self) -> Result<()> {
        Ok(())
    }

    async fn fill_form(&mut self, candidate: &Candidate, resume_path: &Path) -> Result<()> {
        // 简历必须在填表前已经生成
        assert!(resume_path.exists(), "简历文件应当已生成");
        if self.fail_fill_for.as_deref() == Some(candidate.first_name.as_str()) {
            return Err(AppError::form_failed(
                "fill_form",
                format!("下拉框中不存在职位选项: {}", candidate.vacancy),
            ));
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        Ok(())
    }

    async fn close(&mut self) {}
}

fn candidate(first: &str, last: &str) -> Candidate {
    Candidate {
        first_name: first.to_string(),
        last_name: last.to_string(),
        vacancy: "QA Engineer".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        ..Default::default()
    }
}

fn session_factory(
    fail_fill_for: Option<&str>,
    created: Arc<AtomicUsize>,
) -> impl Fn() -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<MockSession>>>> {
    let fail_fill_for = fail_fill_for.map(|s| s.to_string());
    move || {
        let fail_fill_for = fail_fill_for.clone();
        let created = created.clone();
        Box::pin(async move {
            created.fetch_add(1, Ordering::SeqCst);
            Ok(MockSession { fail_fill_for })
        })
    }
}

#[tokio::test]
async fn test_scenario_all_candidates_succeed() {
    let resume_dir = tempfile::tempdir().unwrap();
    let candidates = vec![
        candidate("Ana", "García"),
        candidate("Bob", "Brown"),
        candidate("Carlos", "Ruiz"),
    ];
    let created = Arc::new(AtomicUsize::new(0));

    let stats = run_entry_loop(
        session_factory(None, created.clone()),
        &candidates,
        resume_dir.path(),
    )
    .await;

    assert_eq!(stats.total, 3);
    assert_eq!(stats.success, 3);
    assert!(stats.failed.is_empty());
    // 没有失败时全程只建立一个会话
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_scenario_failed_candidate_triggers_session_restart() {
    let resume_dir = tempfile::tempdir().unwrap();
    let candidates = vec![
        candidate("Ana", "García"),
        candidate("Bob", "Brown"),
        candidate("Carlos", "Ruiz"),
    ];
    let created = Arc::new(AtomicUsize::new(0));

    let stats = run_entry_loop(
        session_factory(Some("Bob"), created.clone()),
        &candidates,
        resume_dir.path(),
    )
    .await;

    assert_eq!(stats.success, 2);
    assert_eq!(stats.failed, vec!["Bob Brown".to_string()]);
    // 第 2 个候选人失败后应重建会话（可观察到重新登录），
    // 第 3 个候选人在新会话中继续处理
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_scenario_first_session_failure_is_fatal() {
    let resume_dir = tempfile::tempdir().unwrap();
    let candidates = vec![candidate("Ana", "García")];
    let created = Arc::new(AtomicUsize::new(0));

    let factory = {
        let created = created.clone();
        move || {
            let created = created.clone();
            Box::pin(async move {
                created.fetch_add(1, Ordering::SeqCst);
                Err::<MockSession, _>(AppError::AuthenticationFailed {
                    reason: "超时未出现登录后的仪表盘标记".to_string(),
                })
            })
                as std::pin::Pin<Box<dyn std::future::Future<Output = Result<MockSession>>>>
        }
    };

    let stats = run_entry_loop(factory, &candidates, resume_dir.path()).await;

    assert_eq!(stats.total, 1);
    assert_eq!(stats.success, 0);
    assert!(stats.failed.is_empty());
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_scenario_missing_source_aborts_before_any_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        candidates_csv_url: dir
            .path()
            .join("no_such.csv")
            .to_string_lossy()
            .to_string(),
        resume_output_dir: dir.path().join("resumes").to_string_lossy().to_string(),
        ..Default::default()
    };
    let credentials = Credentials {
        username: "user".to_string(),
        password: "pass".to_string(),
    };

    // 数据源不存在时应在打开任何浏览器会话之前干净地结束
    let stats = App::new(config, credentials).run().await;
    assert_eq!(stats, RunStats::default());
}

#[tokio::test]
async fn test_scenario_empty_source_yields_zero_summary() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("candidates.csv");
    std::fs::write(&csv_path, "full_name,vacancy\n").unwrap();

    let config = Config {
        candidates_csv_url: csv_path.to_string_lossy().to_string(),
        resume_output_dir: dir.path().join("resumes").to_string_lossy().to_string(),
        ..Default::default()
    };
    let credentials = Credentials {
        username: "user".to_string(),
        password: "pass".to_string(),
    };

    let stats = App::new(config, credentials).run().await;
    assert_eq!(stats.total, 0);
    assert_eq!(stats.success, 0);
    assert!(stats.failed.is_empty());
}
