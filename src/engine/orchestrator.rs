// ==========================================
// Excel2Database - 导入编排器
// ==========================================
// 状态机: IDLE → TRANSACTION_OPEN → { COMMITTED | ROLLED_BACK }
// - IDLE → TRANSACTION_OPEN: 关闭 autocommit
// - → COMMITTED: 建表成功 且 所有行通过校验 且 批量写入成功
// - → ROLLED_BACK: 任一环节失败或有行被拒绝
// 提交/回滚之后始终恢复 autocommit；不做任何重试
// ==========================================

use crate::db;
use crate::domain::persona::ImportOutcome;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::ExcelParser;
use crate::importer::persona_importer::PersonaImporter;
use crate::repository::{PersonaRepository, PersonaRepositoryImpl};
use calamine::{Data, Range};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{error, info, instrument, warn};

// ==========================================
// TransactionState - 事务状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Idle,            // 未开始
    TransactionOpen, // 事务进行中
    Committed,       // 已提交
    RolledBack,      // 已回滚
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionState::Idle => write!(f, "IDLE"),
            TransactionState::TransactionOpen => write!(f, "TRANSACTION_OPEN"),
            TransactionState::Committed => write!(f, "COMMITTED"),
            TransactionState::RolledBack => write!(f, "ROLLED_BACK"),
        }
    }
}

// ==========================================
// ImportOrchestrator - 导入编排器
// ==========================================
// 一个编排器独占一个连接，只执行一次导入
pub struct ImportOrchestrator<'c> {
    conn: &'c Connection,
    state: TransactionState,
}

impl<'c> ImportOrchestrator<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            state: TransactionState::Idle,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// 导入工作簿的第一个工作表
    ///
    /// 文件读取也在事务内进行，读取失败同样回滚
    #[instrument(skip(self, file_path))]
    pub fn import_file<P: AsRef<Path>>(&mut self, file_path: P) -> ImportResult<ImportOutcome> {
        let path = file_path.as_ref();
        info!(path = %path.display(), "开始导入人员数据");

        self.run_in_transaction(|conn| {
            let (sheet_name, range) = ExcelParser.read_first_sheet(path)?;
            import_into(conn, &sheet_name, &range)
        })
    }

    /// 导入已读取的工作表
    #[instrument(skip(self, range))]
    pub fn import_sheet(
        &mut self,
        sheet_name: &str,
        range: &Range<Data>,
    ) -> ImportResult<ImportOutcome> {
        self.run_in_transaction(|conn| import_into(conn, sheet_name, range))
    }

    /// 在单个事务中执行导入，并根据结果提交或回滚
    fn run_in_transaction<F>(&mut self, work: F) -> ImportResult<ImportOutcome>
    where
        F: FnOnce(&Connection) -> ImportResult<ImportOutcome>,
    {
        if self.state != TransactionState::Idle {
            return Err(ImportError::InvalidState(format!(
                "当前状态为 {}，编排器只能执行一次导入",
                self.state
            )));
        }

        db::begin_transaction(self.conn)?;
        self.state = TransactionState::TransactionOpen;

        match work(self.conn) {
            Ok(ImportOutcome::Imported(summary)) => match db::commit(self.conn) {
                Ok(()) => {
                    self.state = TransactionState::Committed;
                    info!(
                        batch_id = %summary.batch_id,
                        rows = summary.rows_imported,
                        "导入完成，已提交"
                    );
                    Ok(ImportOutcome::Imported(summary))
                }
                Err(e) => {
                    // commit 失败时未结束的事务已被回滚
                    self.state = TransactionState::RolledBack;
                    Err(e.into())
                }
            },
            Ok(ImportOutcome::Rejected(rejection)) => {
                warn!(rejection = %rejection, "导入被拒绝");
                self.rollback();
                Ok(ImportOutcome::Rejected(rejection))
            }
            Err(e) => {
                error!(error = %e, "导入失败");
                self.rollback();
                Err(e)
            }
        }
    }

    fn rollback(&mut self) {
        if let Err(e) = db::rollback(self.conn) {
            error!(error = %e, "回滚失败");
        }
        self.state = TransactionState::RolledBack;
    }
}

/// 建表 + 行导入（在已开启的事务内）
fn import_into(
    conn: &Connection,
    sheet_name: &str,
    range: &Range<Data>,
) -> ImportResult<ImportOutcome> {
    let repo = PersonaRepositoryImpl::new(conn);
    repo.create_table_if_missing()?;
    PersonaImporter::new(repo).import_rows(sheet_name, range)
}
