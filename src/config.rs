use crate::error::{AppError, Result};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 目标应用的登录页 URL
    pub base_url: String,
    /// 候选人 CSV 数据源（本地路径或 http(s) URL）
    pub candidates_csv_url: String,
    /// 步骤内查找控件的隐式等待时长（秒）
    pub implicit_wait_secs: u64,
    /// 等待后置条件标记出现的显式超时（秒）
    pub explicit_wait_secs: u64,
    /// 生成的简历文件输出目录
    pub resume_output_dir: String,
    /// 日志文件路径
    pub log_file_path: String,
    /// 是否以无头模式启动浏览器
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://opensource-demo.orangehrmlive.com/web/index.php".to_string(),
            candidates_csv_url: "candidatos.csv".to_string(),
            implicit_wait_secs: 10,
            explicit_wait_secs: 20,
            resume_output_dir: "output/resumes".to_string(),
            log_file_path: "output/logs/rpa_challenge.log".to_string(),
            headless: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("HRM_BASE_URL").unwrap_or(default.base_url),
            candidates_csv_url: std::env::var("CANDIDATES_CSV_URL")
                .unwrap_or(default.candidates_csv_url),
            implicit_wait_secs: std::env::var("IMPLICIT_WAIT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.implicit_wait_secs),
            explicit_wait_secs: std::env::var("EXPLICIT_WAIT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.explicit_wait_secs),
            resume_output_dir: std::env::var("RESUME_OUTPUT_PATH")
                .unwrap_or(default.resume_output_dir),
            log_file_path: std::env::var("LOG_FILE_PATH").unwrap_or(default.log_file_path),
            headless: std::env::var("HEADLESS_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.headless),
        }
    }
}

/// 登录凭据
///
/// 只从进程环境读取，不出现在数据源文件里。
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("HRM_USERNAME")
            .map_err(|_| AppError::Config("缺少环境变量 HRM_USERNAME".to_string()))?;
        let password = std::env::var("HRM_PASSWORD")
            .map_err(|_| AppError::Config("缺少环境变量 HRM_PASSWORD".to_string()))?;
        Ok(Self { username, password })
    }
}
