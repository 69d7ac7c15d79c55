// ==========================================
// Excel2Database - 导入层
// ==========================================
// 职责:
// - 工作簿模式推断（表名、字段名、字段类型）
// - personas 行校验与批量写入
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls) / OpenDocument (.ods)
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod persona_importer;
pub mod schema_builder;
pub mod type_inferencer;

// 重导出核心类型
pub use conflict_handler::ConflictHandler;
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{ExcelParser, NamedSheet};
pub use persona_importer::PersonaImporter;
pub use schema_builder::SchemaBuilder;
pub use type_inferencer::{infer_type, INTEGER_EPSILON};
