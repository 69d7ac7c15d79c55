// ==========================================
// Excel2Database - SQLite 连接与事务管理
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为（外键、busy_timeout）
// - 事务开启/提交/回滚后始终恢复 autocommit 模式
// ==========================================

use crate::config::DatabaseConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

// ==========================================
// ConnectionProvider - 连接提供者
// ==========================================
// 生命周期: 创建数据库 → 获取连接 → 使用后随作用域释放
pub struct ConnectionProvider {
    db_path: PathBuf,
}

impl ConnectionProvider {
    pub fn new(config: &DatabaseConfig) -> Self {
        if !config.ignored_keys.is_empty() {
            debug!(keys = ?config.ignored_keys, "以下连接参数不适用于 SQLite，已忽略");
        }
        Self {
            db_path: config.path.clone(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// 创建数据库（已存在则跳过）
    ///
    /// # 返回
    /// - Ok(true): 本次新建
    /// - Ok(false): 已存在
    pub fn create_database_if_missing(&self) -> RepositoryResult<bool> {
        let existed = self.db_path.exists();

        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    error!(path = %parent.display(), error = %e, "创建数据库目录失败");
                    RepositoryError::DatabaseCreationError(format!(
                        "{}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(&self.db_path).map_err(|e| {
            error!(path = %self.db_path.display(), error = %e, "创建数据库失败");
            RepositoryError::DatabaseCreationError(e.to_string())
        })?;
        configure_sqlite_connection(&conn)?;
        drop(conn);

        info!(path = %self.db_path.display(), created = !existed, "数据库已创建/验证");
        Ok(!existed)
    }

    /// 打开已存在的数据库
    ///
    /// 不隐式创建数据库文件；需先调用 create_database_if_missing
    pub fn get_connection(&self) -> RepositoryResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&self.db_path, flags)
            .and_then(|conn| {
                configure_sqlite_connection(&conn)?;
                Ok(conn)
            })
            .map_err(|e| {
                error!(path = %self.db_path.display(), error = %e, "连接数据库失败");
                RepositoryError::DatabaseConnectionError(format!(
                    "{}: {}",
                    self.db_path.display(),
                    e
                ))
            })?;

        debug!(path = %self.db_path.display(), "数据库连接已建立");
        Ok(conn)
    }
}

// ==========================================
// 事务原语
// ==========================================

/// 关闭 autocommit，开启事务
pub fn begin_transaction(conn: &Connection) -> RepositoryResult<()> {
    if !conn.is_autocommit() {
        return Err(RepositoryError::DatabaseTransactionError(
            "连接上已有未结束的事务".to_string(),
        ));
    }
    conn.execute_batch("BEGIN")
        .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
    debug!("事务已开启 (autocommit = false)");
    Ok(())
}

/// 提交事务，并恢复 autocommit
///
/// 提交失败时返回错误；恢复 autocommit 失败只记录日志
pub fn commit(conn: &Connection) -> RepositoryResult<()> {
    info!("正在提交 (COMMIT)...");
    let result = conn
        .execute_batch("COMMIT")
        .map_err(|e| RepositoryError::DatabaseTransactionError(format!("COMMIT 失败: {}", e)));

    match &result {
        Ok(()) => info!("COMMIT 完成"),
        Err(e) => error!(error = %e, "COMMIT 失败"),
    }

    restore_autocommit(conn);
    result
}

/// 回滚事务，并恢复 autocommit
pub fn rollback(conn: &Connection) -> RepositoryResult<()> {
    warn!("检测到错误，正在回滚 (ROLLBACK)...");
    let result = if conn.is_autocommit() {
        // SQLite 在部分错误后会自动结束事务
        Ok(())
    } else {
        conn.execute_batch("ROLLBACK").map_err(|e| {
            RepositoryError::DatabaseTransactionError(format!("ROLLBACK 失败: {}", e))
        })
    };

    match &result {
        Ok(()) => warn!("ROLLBACK 完成"),
        Err(e) => error!(error = %e, "ROLLBACK 失败"),
    }

    restore_autocommit(conn);
    result
}

/// 确保连接回到 autocommit 模式
///
/// SQLite 在事务结束后自动恢复 autocommit；若事务仍处于打开状态
/// （例如 COMMIT 失败），则强制回滚
fn restore_autocommit(conn: &Connection) {
    if conn.is_autocommit() {
        debug!("autocommit 已恢复");
        return;
    }

    match conn.execute_batch("ROLLBACK") {
        Ok(()) => debug!("autocommit 已恢复（强制回滚未结束的事务）"),
        Err(e) => warn!(error = %e, "恢复 autocommit 失败"),
    }
}
