use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::ObjectCache;
use crate::cache::object_cache::MokaCacheWrapper;
use crate::storage::{FileStore, Storage, create_file_store, create_storage};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub file_store: Arc<dyn FileStore>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 初始化默认的学院层级
/// 全新数据库没有任何学院时，种一条 学院→院系→课程→班级 链，
/// 注册时提交的归属 ID 才有可校验的对象
async fn seed_affiliations(storage: &Arc<dyn Storage>) {
    match storage.count_colleges().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} college(s), skipping seed", count);
            return;
        }
        Ok(_) => {
            info!("No colleges found in database, seeding default affiliation hierarchy...");
        }
        Err(e) => {
            warn!("Failed to count colleges: {}, skipping seed", e);
            return;
        }
    }

    let result = async {
        let college = storage.create_college("Default College").await?;
        let faculty = storage
            .create_faculty(college.id, "Default Faculty")
            .await?;
        let course = storage.create_course(faculty.id, "Default Course").await?;
        let class = storage.create_class(course.id, "Default Class").await?;
        Ok::<_, crate::errors::AssignMateError>(class)
    }
    .await;

    match result {
        Ok(class) => {
            info!(
                "Default affiliation hierarchy seeded (class ID: {})",
                class.id
            );
        }
        Err(e) => {
            warn!("Failed to seed affiliation hierarchy: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、文件存储和缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let file_store = create_file_store().expect("Failed to create file store");
    warn!("File store initialized");

    // 初始化默认学院层级（如果需要）
    seed_affiliations(&storage).await;

    let cache: Arc<dyn ObjectCache> =
        Arc::new(MokaCacheWrapper::new().expect("Failed to create cache"));
    warn!("Cache backend initialized");

    StartupContext {
        storage,
        file_store,
        cache,
    }
}
