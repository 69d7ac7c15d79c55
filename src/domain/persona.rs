// ==========================================
// Excel2Database - 人员导入领域模型
// ==========================================
// 目标表: personas（固定结构，与推断出的工作簿模型无关）
// 导入语义: 全部成功或全部回滚，结果以 ImportOutcome 表达
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 性别 (Gender)
// ==========================================
// 仅用于生成 genero 列的 CHECK 约束；导入时不做校验，原样透传
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Masculino,
    Femenino,
    Neutro,
    Otro,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Masculino,
        Gender::Femenino,
        Gender::Neutro,
        Gender::Otro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculino => "MASCULINO",
            Gender::Femenino => "FEMENINO",
            Gender::Neutro => "NEUTRO",
            Gender::Otro => "OTRO",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// RawPersonaRecord - 字段映射后的原始行
// ==========================================
// 五个位置字段均为字符串，缺失单元格为空串（不会是 None）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPersonaRecord {
    pub row_number: usize, // 工作表行号（从 1 开始）
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub telefono: String,
    pub genero: String,
}

// ==========================================
// Persona - 待写入 personas 的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub telefono: i32,
    pub genero: String,
}

// ==========================================
// RejectionReason - 整批拒绝原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// 电话不是纯数字
    NonNumericPhone { value: String },
    /// 电话超出 32 位有符号整数范围
    PhoneOutOfRange { value: String },
    /// email 已存在于目标表
    DuplicateEmail { email: String },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NonNumericPhone { value } => {
                write!(f, "电话号码非数字 -> '{}'", value)
            }
            RejectionReason::PhoneOutOfRange { value } => {
                write!(f, "电话号码超出范围 -> '{}'", value)
            }
            RejectionReason::DuplicateEmail { email } => {
                write!(f, "email 重复 -> '{}'", email)
            }
        }
    }
}

// ==========================================
// RowRejection - 触发整批回滚的行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_number: usize, // 工作表行号（从 1 开始）
    pub reason: RejectionReason,
}

impl RowRejection {
    pub fn new(row_number: usize, reason: RejectionReason) -> Self {
        Self { row_number, reason }
    }
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "第 {} 行: {}", self.row_number, self.reason)
    }
}

// ==========================================
// ImportSummary - 成功导入汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub sheet_name: String,
    pub rows_imported: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
// Imported: 所有行通过校验并已批量写入（由编排器提交）
// Rejected: 某一行触发整批拒绝（由编排器回滚）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportOutcome {
    Imported(ImportSummary),
    Rejected(RowRejection),
}

impl ImportOutcome {
    pub fn is_imported(&self) -> bool {
        matches!(self, ImportOutcome::Imported(_))
    }

    /// 写入的行数；被拒绝时为 0
    pub fn rows_imported(&self) -> usize {
        match self {
            ImportOutcome::Imported(summary) => summary.rows_imported,
            ImportOutcome::Rejected(_) => 0,
        }
    }

    pub fn rejection(&self) -> Option<&RowRejection> {
        match self {
            ImportOutcome::Imported(_) => None,
            ImportOutcome::Rejected(rejection) => Some(rejection),
        }
    }
}
