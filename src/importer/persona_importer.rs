// ==========================================
// Excel2Database - 人员行校验与批量导入
// ==========================================
// 前置条件: personas 表已存在，调用方已开启事务
// 流程（逐行，跳过完全空白的行）:
// 1. 按列位置提取五个文本字段
// 2. 校验电话为纯数字并解析为 i32
// 3. 预检查 email 是否已存在于目标表
// 4. 暂存
// 全部通过后一次性批量写入；任何一行失败即整批拒绝
// ==========================================

use crate::domain::persona::{
    ImportOutcome, ImportSummary, Persona, RawPersonaRecord, RowRejection,
};
use crate::importer::conflict_handler::ConflictHandler;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::is_blank_row;
use crate::repository::PersonaRepository;
use calamine::{Data, Range};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 第一个数据行（绝对行号，表头之后）
pub const FIRST_DATA_ROW: u32 = 1;

// ==========================================
// PersonaImporter
// ==========================================
pub struct PersonaImporter<R>
where
    R: PersonaRepository,
{
    repo: R,
    field_mapper: FieldMapper,
    dq_validator: DqValidator,
    conflict_handler: ConflictHandler,
}

impl<R> PersonaImporter<R>
where
    R: PersonaRepository,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            field_mapper: FieldMapper,
            dq_validator: DqValidator,
            conflict_handler: ConflictHandler::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 校验并导入工作表的数据行
    ///
    /// # 返回
    /// - Ok(Imported): 所有行已写入（尚未提交）
    /// - Ok(Rejected): 某行校验/重复检查失败，未写入任何行
    /// - Err: 数据库错误（包括批量写入时的约束违反）
    pub fn import_rows(&self, sheet_name: &str, range: &Range<Data>) -> ImportResult<ImportOutcome> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        info!(batch_id = %batch_id, sheet = %sheet_name, "开始校验数据行");

        let mut staged = Vec::new();

        if let Some(end) = range.end() {
            for row in FIRST_DATA_ROW..=end.0 {
                if is_blank_row(range, row) {
                    continue;
                }

                let record = self.field_mapper.map_row(range, row);
                match self.validate_record(record)? {
                    Ok(persona) => staged.push(persona),
                    Err(rejection) => {
                        warn!(
                            batch_id = %batch_id,
                            row_number = rejection.row_number,
                            reason = %rejection.reason,
                            "行校验失败，整批拒绝"
                        );
                        return Ok(ImportOutcome::Rejected(rejection));
                    }
                }
            }
        }

        debug!(staged = staged.len(), "全部行校验通过，执行批量写入");
        let rows_imported = self.repo.batch_insert(&staged)?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            rows = rows_imported,
            elapsed_ms = elapsed_ms,
            "批量写入完成"
        );

        Ok(ImportOutcome::Imported(ImportSummary {
            batch_id,
            sheet_name: sheet_name.to_string(),
            rows_imported,
            started_at,
            elapsed_ms,
        }))
    }

    /// 校验单行
    ///
    /// 外层 Err 为数据库错误，内层 Err 为行级拒绝
    fn validate_record(
        &self,
        record: RawPersonaRecord,
    ) -> ImportResult<Result<Persona, RowRejection>> {
        let telefono = match self.dq_validator.validate_phone(&record.telefono) {
            Ok(telefono) => telefono,
            Err(reason) => return Ok(Err(RowRejection::new(record.row_number, reason))),
        };

        if let Some(reason) =
            self.conflict_handler
                .check(&self.repo, &record.email, record.row_number)?
        {
            return Ok(Err(RowRejection::new(record.row_number, reason)));
        }

        // genero 原样透传，由表的 CHECK 约束把关
        Ok(Ok(Persona {
            nombre: record.nombre,
            apellidos: record.apellidos,
            email: record.email,
            telefono,
            genero: record.genero,
        }))
    }
}
