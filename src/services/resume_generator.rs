//! 简历生成 - 业务能力层
//!
//! 为单个候选人生成固定版式的纯文本简历文件。
//! 文件按净化后的 `名_姓` 命名，同名时静默覆盖：
//! 简历是每次运行重新生成的临时产物，不是事实记录。

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::Candidate;
use crate::utils::fs::ensure_dir;

/// 生成文件名的固定后缀
const RESUME_SUFFIX: &str = "_resume.txt";

/// 去除文件名中除字母数字、空格、下划线以外的字符，并修剪尾部空白
fn sanitize(name: &str) -> String {
    // 与教学目标站点无关的纯本地规则，unicode 字母数字保留
    let re = Regex::new(r"[^\p{L}\p{N} _]").expect("非法的净化正则");
    re.replace_all(name, "").trim_end().to_string()
}

/// 为候选人生成简历文件，返回文件路径
///
/// 对同一候选人和目录重复调用是幂等的（内容相同，原文件被覆盖）。
pub fn generate_resume_file(candidate: &Candidate, output_dir: &Path) -> Result<PathBuf> {
    ensure_dir(output_dir)?;

    let file_name = format!(
        "{}_{}{}",
        sanitize(&candidate.first_name),
        sanitize(&candidate.last_name),
        RESUME_SUFFIX
    );
    let file_path = output_dir.join(file_name);

    let content = format!(
        "Resume for: {} {}\n\
         --------------------\n\
         Email: {}\n\
         Contact Number: {}\n\
         Applying for Vacancy: {}\n\
         Date of Application: {}\n\
         \n\
         Keywords:\n{}\n\
         \n\
         Notes:\n{}\n",
        candidate.first_name,
        candidate.last_name,
        candidate.email,
        candidate.contact_number,
        candidate.vacancy,
        candidate.date_of_application,
        candidate.keywords,
        candidate.notes,
    );

    fs::write(&file_path, content)
        .map_err(|e| AppError::io_failed(file_path.display().to_string(), e))?;

    info!(
        "已生成简历: {} -> {}",
        candidate.display_name(),
        file_path.display()
    );
    Ok(file_path)
}
