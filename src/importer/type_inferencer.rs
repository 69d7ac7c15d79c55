// ==========================================
// Excel2Database - 单元格类型推断
// ==========================================
// 规则:
// - 缺失/空单元格 → UNKNOWN
// - 文本 → STRING，布尔 → BOOLEAN
// - 数值: 日期/时间格式 → DATE；|值 - 最近整数| < EPSILON → INTEGER；否则 DECIMAL
// - 其他（错误值等）→ UNKNOWN
// ==========================================

use crate::domain::schema::FieldType;
use calamine::Data;

/// 判定整数的小数部分阈值
pub const INTEGER_EPSILON: f64 = 1e-10;

/// 推断单元格类型（纯函数）
pub fn infer_type(cell: Option<&Data>) -> FieldType {
    let Some(cell) = cell else {
        return FieldType::Unknown;
    };

    match cell {
        Data::String(_) => FieldType::String,
        Data::Bool(_) => FieldType::Boolean,
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => FieldType::Date,
        Data::Int(_) => FieldType::Integer,
        Data::Float(value) => infer_numeric(*value),
        Data::Empty => FieldType::Unknown,
        _ => FieldType::Unknown,
    }
}

/// 非日期数值: 按与最近整数的距离区分整数/小数
///
/// 正负数对称: -5.00000000001 与 4.99999999999 都判为 INTEGER
pub fn infer_numeric(value: f64) -> FieldType {
    if (value - value.round()).abs() < INTEGER_EPSILON {
        FieldType::Integer
    } else {
        FieldType::Decimal
    }
}
