//! 本地文件系统辅助函数

use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

use crate::error::{AppError, Result};

/// 确保目录存在（幂等）
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| AppError::io_failed(path.display().to_string(), e))
}

/// 清空目录内的所有文件和子目录
///
/// 目录本身保留。目录不存在时只告警不报错；
/// 单个条目删除失败时记录后继续，不中断清理。
/// 对已经为空的目录调用是无害的。
pub fn cleanup_directory(directory_path: &Path) -> Result<()> {
    if !directory_path.is_dir() {
        warn!("待清理的目录不存在: {}", directory_path.display());
        return Ok(());
    }

    info!("清理目录: {}", directory_path.display());
    let entries = fs::read_dir(directory_path)
        .map_err(|e| AppError::io_failed(directory_path.display().to_string(), e))?;

    for entry in entries.flatten() {
        let item_path = entry.path();
        let removed = if item_path.is_dir() {
            fs::remove_dir_all(&item_path)
        } else {
            fs::remove_file(&item_path)
        };
        if let Err(e) = removed {
            error!("删除 {} 失败: {}", item_path.display(), e);
        }
    }
    info!("目录清理完成: {}", directory_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_files_and_subdirs() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), "y").unwrap();

        cleanup_directory(dir.path()).expect("清理失败");

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_empty_directory_is_idempotent() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");

        cleanup_directory(dir.path()).expect("第一次清理失败");
        cleanup_directory(dir.path()).expect("第二次清理失败");

        assert!(dir.path().is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_missing_directory_is_noop() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let missing = dir.path().join("no_such_dir");

        assert!(cleanup_directory(&missing).is_ok());
    }
}
