//! 本地临时文件管理。
//!
//! 每次调用写入独立的临时文件，路径由调用 ID 派生，
//! 并发请求之间不会互相覆盖。

use crate::utils::path::sanitize_file_stem;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 临时文件所在目录
#[derive(Debug, Clone)]
pub struct ScratchSpace {
    dir: PathBuf,
}

/// 一次调用写入的临时文件
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchSpace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 返回某次调用对应的临时文件路径。
    pub fn path_for(&self, invocation_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_file_stem(invocation_id)))
    }

    /// 将字节写入调用对应的临时文件，已有内容会被截断。
    ///
    /// # 参数
    ///
    /// * `invocation_id` - 调用 ID，用于派生文件名。
    /// * `bytes` - 要写入的内容。
    ///
    /// # Errors
    ///
    /// 目录创建或文件写入失败时返回 I/O 错误。
    pub async fn write(&self, invocation_id: &str, bytes: &[u8]) -> io::Result<ScratchFile> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(invocation_id);
        if let Err(e) = fs::write(&path, bytes).await {
            // 写入中途失败（例如磁盘已满）时不留下残缺文件
            fs::remove_file(&path).await.ok();
            return Err(e);
        }

        Ok(ScratchFile { path })
    }
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 删除临时文件，失败只记录日志。
    pub async fn discard(self) {
        if let Err(e) = fs::remove_file(&self.path).await {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove scratch file"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::new(dir.path());

        let file = scratch.write("req-1", br#"{"data":"hello"}"#).await.unwrap();
        assert_eq!(file.path(), dir.path().join("req-1.json"));
        assert_eq!(
            fs::read(file.path()).await.unwrap(),
            br#"{"data":"hello"}"#.to_vec()
        );

        let path = file.path().to_path_buf();
        file.discard().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::new(dir.path());

        scratch.write("same", b"a much longer first write").await.unwrap();
        let file = scratch.write("same", b"short").await.unwrap();

        assert_eq!(fs::read(file.path()).await.unwrap(), b"short".to_vec());
    }

    #[tokio::test]
    async fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::new(dir.path().join("nested").join("scratch"));

        let file = scratch.write("req-2", b"{}").await.unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn test_invocations_do_not_share_paths() {
        let scratch = ScratchSpace::new("/tmp");
        assert_ne!(scratch.path_for("a"), scratch.path_for("b"));
        assert_eq!(scratch.path_for("../x"), PathBuf::from("/tmp/___x.json"));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::new(dir.path());

        // 指向 /dev/full 的链接可以打开，但写入时返回 ENOSPC
        let path = scratch.path_for("req-full");
        std::os::unix::fs::symlink("/dev/full", &path).unwrap();

        assert!(scratch.write("req-full", b"{\"data\":\"x\"}").await.is_err());
        assert!(std::fs::symlink_metadata(&path).is_err());
    }

    #[tokio::test]
    async fn test_write_fails_when_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let scratch = ScratchSpace::new(&blocker);
        assert!(scratch.write("req", b"{}").await.is_err());
    }
}
