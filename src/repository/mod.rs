// ==========================================
// Excel2Database - 数据仓储层
// ==========================================
// 职责: 数据访问，不含业务逻辑
// 存储: SQLite (rusqlite)
// ==========================================

pub mod error;
pub mod persona_repo;
pub mod persona_repo_impl;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use persona_repo::{PersonaRepository, PERSONAS_TABLE};
pub use persona_repo_impl::{personas_ddl, PersonaRepositoryImpl};
