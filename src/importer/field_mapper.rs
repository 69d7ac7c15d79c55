// ==========================================
// Excel2Database - 字段映射
// ==========================================
// 职责: 按列位置提取人员字段（全部作为文本）
// 列序: nombre | apellidos | email | telefono | genero
// ==========================================

use crate::domain::persona::RawPersonaRecord;
use crate::importer::file_parser::cell_text;
use calamine::{Data, Range};

/// 列位置
pub mod cols {
    pub const NOMBRE: u32 = 0;
    pub const APELLIDOS: u32 = 1;
    pub const EMAIL: u32 = 2;
    pub const TELEFONO: u32 = 3;
    pub const GENERO: u32 = 4;
}

pub struct FieldMapper;

impl FieldMapper {
    /// 映射一行（绝对行号）为 RawPersonaRecord
    ///
    /// 缺失单元格映射为空串；row_number 为从 1 开始的工作表行号
    pub fn map_row(&self, range: &Range<Data>, row: u32) -> RawPersonaRecord {
        RawPersonaRecord {
            row_number: row as usize + 1,
            nombre: cell_text(range, row, cols::NOMBRE),
            apellidos: cell_text(range, row, cols::APELLIDOS),
            email: cell_text(range, row, cols::EMAIL),
            telefono: cell_text(range, row, cols::TELEFONO),
            genero: cell_text(range, row, cols::GENERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_row_with_missing_cells() {
        let mut range = Range::new((0, 0), (1, 4));
        range.set_value((1, 0), Data::String("Ana".to_string()));
        range.set_value((1, 2), Data::String(" ana@example.com ".to_string()));
        range.set_value((1, 3), Data::Float(612345678.0));

        let record = FieldMapper.map_row(&range, 1);

        assert_eq!(record.row_number, 2);
        assert_eq!(record.nombre, "Ana");
        assert_eq!(record.apellidos, "");
        assert_eq!(record.email, "ana@example.com");
        assert_eq!(record.telefono, "612345678");
        assert_eq!(record.genero, "");
    }
}
