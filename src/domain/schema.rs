// ==========================================
// Excel2Database - 工作簿模式模型
// ==========================================
// 结构: 工作簿 → 表（工作表）→ 字段（列名 + 推断类型）
// 生命周期: 仅存在于一次推断过程中，打印/记录后丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 字段类型 (Field Type)
// ==========================================
// 由样本行（第二行）的单元格一次性推断，之后不再校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    String,  // 文本
    Boolean, // 布尔
    Integer, // 整数
    Decimal, // 小数
    Date,    // 日期/时间格式的数值
    Unknown, // 缺失或无法识别
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "STRING"),
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Integer => write!(f, "INTEGER"),
            FieldType::Decimal => write!(f, "DECIMAL"),
            FieldType::Date => write!(f, "DATE"),
            FieldType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// FieldModel - 字段
// ==========================================
// 同一张表内的字段名不保证唯一（源表头重复时会重复）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

impl fmt::Display for FieldModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.field_type)
    }
}

// ==========================================
// TableModel - 表
// ==========================================
// 表名取自工作表名，字段按列顺序排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableModel {
    pub name: String,
    pub fields: Vec<FieldModel>,
}

impl TableModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: FieldModel) {
        self.fields.push(field);
    }

    /// 按名称查找第一个匹配的字段
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// 类型为 UNKNOWN 的字段
    pub fn unknown_fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields
            .iter()
            .filter(|f| f.field_type == FieldType::Unknown)
    }
}

impl fmt::Display for TableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for field in &self.fields {
            writeln!(f, "  - {}", field)?;
        }
        Ok(())
    }
}

// ==========================================
// WorkbookModel - 工作簿
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookModel {
    pub tables: Vec<TableModel>,
}

impl WorkbookModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: TableModel) {
        self.tables.push(table);
    }

    pub fn table(&self, name: &str) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// 导出为 JSON（用于日志/调试输出）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for WorkbookModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}
