use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::errors::{AssignMateError, Result};
use crate::storage::file_store::FileStore;

/// 本地磁盘文件存储
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        let root = PathBuf::from(&config.file_store.root);

        std::fs::create_dir_all(&root).map_err(|e| {
            AssignMateError::external_storage(format!("创建文件存储目录失败: {e}"))
        })?;

        info!("LocalFileStore initialized at {}", root.display());
        Ok(Self { root })
    }

    fn resolve(&self, token: &str) -> Result<PathBuf> {
        // token 是由服务端生成的文件名，不允许出现路径成分
        if token.is_empty()
            || token.contains('/')
            || token.contains('\\')
            || token.contains("..")
        {
            return Err(AssignMateError::validation(format!(
                "非法的文件 token: {token}"
            )));
        }
        Ok(self.root.join(token))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, token: &str, src: &Path) -> Result<()> {
        let dest = self.resolve(token)?;

        // 暂存目录可能和存储根不在同一文件系统，rename 失败时退回复制
        if tokio::fs::rename(src, &dest).await.is_err() {
            tokio::fs::copy(src, &dest).await.map_err(|e| {
                AssignMateError::external_storage(format!("写入文件失败: {e}"))
            })?;
            let _ = tokio::fs::remove_file(src).await;
        }

        debug!("Stored file {}", token);
        Ok(())
    }

    async fn fetch(&self, token: &str) -> Result<Vec<u8>> {
        let path = self.resolve(token)?;

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssignMateError::not_found(format!("文件不存在: {token}"))
            } else {
                AssignMateError::external_storage(format!("读取文件失败: {e}"))
            }
        })
    }

    async fn delete(&self, token: &str) -> Result<()> {
        let path = self.resolve(token)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted file {}", token);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssignMateError::external_storage(format!(
                "删除文件失败: {e}"
            ))),
        }
    }
}
