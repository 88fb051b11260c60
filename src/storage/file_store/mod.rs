//! 提交文件存储
//!
//! 提交的 PDF 以不透明 token 为键存取，数据库只保存 token。

mod local;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub use local::LocalFileStore;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// 把本地暂存文件收入存储
    async fn put(&self, token: &str, src: &Path) -> Result<()>;

    /// 读取文件内容
    async fn fetch(&self, token: &str) -> Result<Vec<u8>>;

    /// 删除文件；文件不存在不算错误
    async fn delete(&self, token: &str) -> Result<()>;
}

pub fn create_file_store() -> Result<Arc<dyn FileStore>> {
    let store = LocalFileStore::new()?;
    Ok(Arc::new(store))
}
