use anyhow::Result;

use hrm_candidate_entry::app::App;
use hrm_candidate_entry::config::{Config, Credentials};
use hrm_candidate_entry::logger;

#[tokio::main]
async fn main() -> Result<()> {
    // 从 .env 加载环境变量（不存在时忽略）
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志，guard 保证退出前刷新文件缓冲
    let _guard = logger::init(&config.log_file_path);

    // 凭据只从进程环境读取，缺失时启动失败
    let credentials = Credentials::from_env()?;

    // 运行完整流程；部分候选人失败只进入汇总，不影响退出码
    let _stats = App::new(config, credentials).run().await;

    Ok(())
}
