// ==========================================
// Excel2Database - 核心库
// ==========================================
// 功能:
// - 读取工作簿，按表头与首行数据推断表结构
// - 将第一个工作表导入 personas 表（单事务，全部成功或全部回滚）
// 技术栈: calamine + rusqlite (SQLite)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 模式模型与人员记录
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 事务编排
pub mod engine;

// 导入层 - 工作簿读取、类型推断、行校验
pub mod importer;

// 配置层 - config.properties
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/事务边界）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{AppConfig, DatabaseConfig};
pub use db::ConnectionProvider;
pub use domain::{
    FieldModel, FieldType, ImportOutcome, ImportSummary, Persona, RejectionReason, RowRejection,
    TableModel, WorkbookModel,
};
pub use engine::{ImportOrchestrator, TransactionState};
pub use importer::{ImportError, ImportResult, SchemaBuilder};
pub use repository::{RepositoryError, RepositoryResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "excel2database";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, env!("CARGO_PKG_NAME"));
    }
}
