// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、测试工作簿生成
// ==========================================
#![allow(dead_code)]

use excel2database::db::ConnectionProvider;
use rust_xlsxwriter::{Format, Workbook};
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// personas 工作表的表头
pub const PERSONA_HEADERS: [&str; 5] = ["nombre", "apellidos", "email", "telefono", "genero"];

/// 测试单元格
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    /// Excel 序列日期（以 yyyy-mm-dd 格式写入）
    Date(f64),
    Blank,
}

/// 创建临时目录中的测试数据库
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - ConnectionProvider: 已创建数据库文件的连接提供者
pub fn create_test_db() -> Result<(TempDir, ConnectionProvider), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let provider = ConnectionProvider::from_path(temp_dir.path().join("agenda.db"));
    provider.create_database_if_missing()?;
    Ok((temp_dir, provider))
}

/// 写入多工作表工作簿
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) -> Result<(), Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;

        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (row, col) = (row as u32, col as u16);
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(row, col, *value)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row, col, *value)?;
                    }
                    Cell::Bool(value) => {
                        worksheet.write_boolean(row, col, *value)?;
                    }
                    Cell::Date(value) => {
                        worksheet.write_number_with_format(row, col, *value, &date_format)?;
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// 写入 personas 工作簿（第一个工作表，表头 + 数据行）
///
/// 全数字的电话以数值写入，其余以文本写入
pub fn write_personas_workbook(
    dir: &Path,
    rows: &[[&str; 5]],
) -> Result<PathBuf, Box<dyn Error>> {
    let mut sheet_rows = vec![PERSONA_HEADERS.iter().map(|h| Cell::Text(*h)).collect::<Vec<_>>()];

    for row in rows {
        let cells = row
            .iter()
            .enumerate()
            .map(|(col, value)| {
                if col == 3 && !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    value.parse::<f64>().map(Cell::Number).unwrap_or(Cell::Text(*value))
                } else if value.is_empty() {
                    Cell::Blank
                } else {
                    Cell::Text(*value)
                }
            })
            .collect();
        sheet_rows.push(cells);
    }

    let path = dir.join("test.xlsx");
    write_workbook(&path, &[("personas", sheet_rows)])?;
    Ok(path)
}
