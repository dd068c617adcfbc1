//! 候选人数据源 - 业务能力层
//!
//! 从 CSV 文件（本地路径或 http(s) URL）加载候选人记录。
//! 必需列为 `full_name`，按第一个空格拆分为名/姓；
//! 其余列均为可选，缺失时映射为空字符串。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::models::Candidate;

/// 必需的合并姓名列
const FULL_NAME_COLUMN: &str = "full_name";

/// 下载 CSV 文件到本地目录，返回本地路径
pub async fn download_csv(url: &str, download_folder: &Path) -> Result<PathBuf> {
    fs::create_dir_all(download_folder)
        .map_err(|e| AppError::io_failed(download_folder.display().to_string(), e))?;

    let file_name = url.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("candidates.csv");
    let local_path = download_folder.join(file_name);

    info!("下载 CSV: {} -> {}", url, local_path.display());
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::Download {
            url: url.to_string(),
            source: e,
        })?;
    let bytes = response.bytes().await.map_err(|e| AppError::Download {
        url: url.to_string(),
        source: e,
    })?;

    fs::write(&local_path, &bytes)
        .map_err(|e| AppError::io_failed(local_path.display().to_string(), e))?;
    info!("下载完成: {} 字节", bytes.len());
    Ok(local_path)
}

/// 按来源引用加载候选人：http(s) URL 先下载，本地路径直接读取
pub async fn fetch_candidates(source: &str, data_dir: &Path) -> Result<Vec<Candidate>> {
    let local_path = if source.starts_with("http://") || source.starts_with("https://") {
        download_csv(source, data_dir).await?
    } else {
        PathBuf::from(source)
    };
    load_candidates(&local_path)
}

/// 从本地 CSV 文件加载候选人记录
///
/// - 文件不存在 → `NotFound`
/// - 缺少 `full_name` 列 → 记录错误并返回空序列（配置级失败，不抛出）
/// - 无法解析的行 → 告警后跳过，不中断整体加载
/// - 结果保持源文件的行顺序
pub fn load_candidates(file_path: &Path) -> Result<Vec<Candidate>> {
    info!("读取候选人 CSV: {}", file_path.display());
    if !file_path.exists() {
        return Err(AppError::NotFound {
            path: file_path.display().to_string(),
        });
    }

    let mut reader = csv::Reader::from_path(file_path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let Some(full_name_idx) = column(FULL_NAME_COLUMN) else {
        error!(
            "CSV 文件 {} 缺少必需的 '{}' 列",
            file_path.display(),
            FULL_NAME_COLUMN
        );
        return Ok(Vec::new());
    };
    let vacancy_idx = column("vacancy");
    let email_idx = column("email");
    let contact_idx = column("contact_number");
    let keywords_idx = column("keywords");

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut candidates = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("跳过第 {} 行（无法解析）: {}", row_index + 1, e);
                continue;
            }
        };

        let full_name = record.get(full_name_idx).unwrap_or("").trim();
        // 按第一个空格拆分，没有空格时姓为空
        let (first_name, last_name) = match full_name.split_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (full_name.to_string(), String::new()),
        };

        candidates.push(Candidate {
            first_name,
            last_name,
            email: field(&record, email_idx),
            vacancy: field(&record, vacancy_idx),
            contact_number: field(&record, contact_idx),
            keywords: field(&record, keywords_idx),
            date_of_application: String::new(),
            notes: String::new(),
        });
    }

    info!("成功加载 {} 个候选人", candidates.len());
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("创建测试 CSV 失败");
        file.write_all(content.as_bytes()).expect("写入测试 CSV 失败");
        path
    }

    #[test]
    fn test_full_name_splits_on_first_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "candidates.csv",
            "full_name,vacancy,email,contact_number,keywords\n\
             Ana García López,QA Engineer,ana@example.com,555-0101,testing\n",
        );

        let candidates = load_candidates(&path).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].first_name, "Ana");
        assert_eq!(candidates[0].last_name, "García López");
        // 名和姓用单个空格重新拼接应还原原始字段
        assert_eq!(
            format!("{} {}", candidates[0].first_name, candidates[0].last_name),
            "Ana García López"
        );
        assert_eq!(candidates[0].vacancy, "QA Engineer");
        assert_eq!(candidates[0].email, "ana@example.com");
    }

    #[test]
    fn test_single_word_name_has_empty_last_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "candidates.csv",
            "full_name,vacancy\nMadonna,Payroll Administrator\n",
        );

        let candidates = load_candidates(&path).unwrap();
        assert_eq!(candidates[0].first_name, "Madonna");
        assert_eq!(candidates[0].last_name, "");
    }

    #[test]
    fn test_missing_full_name_column_yields_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "candidates.csv",
            "name,vacancy\nAna García,QA Engineer\n",
        );

        let candidates = load_candidates(&path).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "candidates.csv",
            "full_name,vacancy\n\
             Ana García,QA Engineer\n\
             Bad Row,QA Engineer,extra,fields,here\n\
             Carlos Ruiz,Payroll Administrator\n",
        );

        let candidates = load_candidates(&path).unwrap();
        // 总行数 3，跳过 1 行
        assert_eq!(candidates.len(), 2);
        // 行顺序保持不变
        assert_eq!(candidates[0].first_name, "Ana");
        assert_eq!(candidates[1].first_name, "Carlos");
    }

    #[test]
    fn test_missing_optional_columns_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "candidates.csv", "full_name\nAna García\n");

        let candidates = load_candidates(&path).unwrap();
        assert_eq!(candidates[0].vacancy, "");
        assert_eq!(candidates[0].email, "");
        assert_eq!(candidates[0].contact_number, "");
        assert_eq!(candidates[0].keywords, "");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_candidates(&dir.path().join("no_such.csv"));

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
