// ==========================================
// Excel2Database - 领域模型层
// ==========================================
// 职责: 工作簿模式模型、人员记录与导入结果
// 红线: 不含数据访问逻辑
// ==========================================

pub mod persona;
pub mod schema;

// 重导出核心类型
pub use persona::{
    Gender, ImportOutcome, ImportSummary, Persona, RawPersonaRecord, RejectionReason,
    RowRejection,
};
pub use schema::{FieldModel, FieldType, TableModel, WorkbookModel};
