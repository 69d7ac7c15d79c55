// ==========================================
// Excel2Database - 工作簿读取
// ==========================================
// 支持: .xlsx / .xlsm / .xlsb / .xls / .ods（calamine 自动识别）
// 说明: 整个工作簿一次性载入内存，不支持流式读取
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// 支持的扩展名
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 工作表: (名称, 单元格区域)
pub type NamedSheet = (String, Range<Data>);

// ==========================================
// ExcelParser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 打开工作簿（检查文件存在与扩展名）
    pub fn open(&self, file_path: &Path) -> ImportResult<Sheets<BufReader<File>>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let workbook = open_workbook_auto(path)?;
        debug!(path = %path.display(), "工作簿已打开");
        Ok(workbook)
    }

    /// 按工作簿顺序读取全部工作表
    pub fn read_sheets(&self, file_path: &Path) -> ImportResult<Vec<NamedSheet>> {
        let mut workbook = self.open(file_path)?;

        let sheet_names = workbook.sheet_names();
        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            let range = workbook.worksheet_range(&name)?;
            debug!(sheet = %name, dimensions = ?range.get_size(), "工作表已读取");
            sheets.push((name, range));
        }

        Ok(sheets)
    }

    /// 读取第一个工作表
    pub fn read_first_sheet(&self, file_path: &Path) -> ImportResult<NamedSheet> {
        let mut workbook = self.open(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::EmptyWorkbook(file_path.display().to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;
        Ok((sheet_name, range))
    }
}

/// 单元格文本（缺失/空单元格返回空串，去除首尾空白）
///
/// 数值以最短十进制文本呈现，例如 612345678.0 → "612345678"
pub fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(cell) => cell.to_string().trim().to_string(),
    }
}

/// 行是否完全空白（所有单元格为空或仅含空白）
pub fn is_blank_row(range: &Range<Data>, row: u32) -> bool {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return true;
    };
    (start.1..=end.1).all(|col| cell_text(range, row, col).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_open_file_not_found() {
        let parser = ExcelParser;
        let result = parser.open(Path::new("no_existe.xlsx"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_open_unsupported_extension() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "nombre,edad").unwrap();

        let parser = ExcelParser;
        let result = parser.open(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "csv"));
    }

    #[test]
    fn test_open_corrupt_workbook() {
        let mut temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(temp_file, "esto no es un zip").unwrap();

        let parser = ExcelParser;
        let result = parser.read_sheets(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_cell_text() {
        let mut range = Range::new((0, 0), (0, 3));
        range.set_value((0, 0), Data::String("  Ana ".to_string()));
        range.set_value((0, 1), Data::Float(612345678.0));
        range.set_value((0, 2), Data::Int(42));

        assert_eq!(cell_text(&range, 0, 0), "Ana");
        assert_eq!(cell_text(&range, 0, 1), "612345678");
        assert_eq!(cell_text(&range, 0, 2), "42");
        assert_eq!(cell_text(&range, 0, 3), "");
        // 区域外
        assert_eq!(cell_text(&range, 5, 9), "");
    }

    #[test]
    fn test_is_blank_row() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("x".to_string()));
        range.set_value((1, 1), Data::String("   ".to_string()));

        assert!(!is_blank_row(&range, 0));
        assert!(is_blank_row(&range, 1));
        assert!(is_blank_row(&range, 2));
        assert!(is_blank_row(&Range::<Data>::empty(), 0));
    }
}
