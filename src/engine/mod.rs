// ==========================================
// Excel2Database - 引擎层
// ==========================================
// 职责: 编排单次导入的事务边界
// ==========================================

pub mod orchestrator;

// 重导出核心类型
pub use orchestrator::{ImportOrchestrator, TransactionState};
