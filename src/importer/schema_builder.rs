// ==========================================
// Excel2Database - 工作簿模式推断
// ==========================================
// 流程（逐个工作表，按工作簿顺序）:
// 1. 第 0 行为表头: 每个非空列的文本即字段名
// 2. 第 1 行为样本: 同列单元格推断字段类型（缺失 → UNKNOWN）
// 3. 按列顺序生成字段，工作表名即表名
// 策略:
// - 缺少表头的工作表: 记录警告并跳过
// - UNKNOWN 字段: 保留在模型中，记录警告
// ==========================================

use crate::domain::schema::{FieldModel, TableModel, WorkbookModel};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{cell_text, ExcelParser, NamedSheet};
use crate::importer::type_inferencer::infer_type;
use calamine::{Data, Range};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// 表头所在行（绝对行号）
pub const HEADER_ROW: u32 = 0;

/// 类型样本所在行（绝对行号）
pub const SAMPLE_ROW: u32 = 1;

// ==========================================
// SchemaBuilder
// ==========================================
pub struct SchemaBuilder {
    parser: ExcelParser,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            parser: ExcelParser,
        }
    }

    /// 读取工作簿并推断模式
    ///
    /// 读取/解析失败不会向上抛出: 记录日志并返回空模型
    pub fn build_workbook<P: AsRef<Path>>(&self, file_path: P) -> WorkbookModel {
        let path = file_path.as_ref();
        match self.try_build_workbook(path) {
            Ok(model) => model,
            Err(e) => {
                error!(path = %path.display(), error = %e, "无法加载 Excel 文件");
                WorkbookModel::new()
            }
        }
    }

    /// 读取工作簿并推断模式（返回错误）
    pub fn try_build_workbook<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<WorkbookModel> {
        let path = file_path.as_ref();
        info!(path = %path.display(), "开始推断工作簿模式");

        let sheets = self.parser.read_sheets(path)?;
        let model = self.build_from_sheets(sheets);

        info!(tables = model.tables.len(), "工作簿模式推断完成");
        Ok(model)
    }

    /// 从已读取的工作表推断模式
    pub fn build_from_sheets<I>(&self, sheets: I) -> WorkbookModel
    where
        I: IntoIterator<Item = NamedSheet>,
    {
        let mut model = WorkbookModel::new();

        for (name, range) in sheets {
            match self.infer_table(&name, &range) {
                Ok(table) => {
                    for field in table.unknown_fields() {
                        warn!(table = %table.name, field = %field.name, "字段类型无法推断 (UNKNOWN)");
                    }
                    debug!(table = %table.name, fields = table.fields.len(), "表结构推断完成");
                    model.add_table(table);
                }
                Err(e) => {
                    warn!(sheet = %name, error = %e, "跳过工作表");
                }
            }
        }

        model
    }

    /// 推断单个工作表的表结构
    ///
    /// # 返回
    /// - Ok(TableModel): 表名 = 工作表名，字段按列顺序
    /// - Err(MalformedSheet): 第 0 行不存在或没有任何非空表头
    pub fn infer_table(&self, sheet_name: &str, range: &Range<Data>) -> ImportResult<TableModel> {
        let malformed = |message: &str| ImportError::MalformedSheet {
            sheet: sheet_name.to_string(),
            message: message.to_string(),
        };

        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            return Err(malformed("工作表为空"));
        };
        if start.0 > HEADER_ROW {
            return Err(malformed("缺少表头行"));
        }

        let headers: Vec<(u32, String)> = (start.1..=end.1)
            .map(|col| (col, cell_text(range, HEADER_ROW, col)))
            .filter(|(_, header)| !header.is_empty())
            .collect();
        if headers.is_empty() {
            return Err(malformed("表头行为空"));
        }

        let mut table = TableModel::new(sheet_name);
        for (col, header) in headers {
            let field_type = infer_type(range.get_value((SAMPLE_ROW, col)));
            table.add_field(FieldModel::new(header, field_type));
        }

        Ok(table)
    }
}
