// ==========================================
// 工作簿模式推断集成测试
// ==========================================
// 测试目标: 从真实 .xlsx 文件推断表名、字段名、字段类型
// ==========================================

mod test_helpers;

use excel2database::domain::{FieldModel, FieldType, TableModel};
use excel2database::importer::{ImportError, SchemaBuilder};
use tempfile::TempDir;
use test_helpers::{write_workbook, Cell};

#[test]
fn test_single_sheet_string_and_integer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alumnos.xlsx");
    write_workbook(
        &path,
        &[(
            "alumnos",
            vec![
                vec![Cell::Text("nombre"), Cell::Text("edad")],
                vec![Cell::Text("Ana"), Cell::Number(30.0)],
                vec![Cell::Text("Luis"), Cell::Text("no es un número")],
            ],
        )],
    )
    .unwrap();

    let model = SchemaBuilder::new().build_workbook(&path);

    let mut expected = TableModel::new("alumnos");
    expected.add_field(FieldModel::new("nombre", FieldType::String));
    expected.add_field(FieldModel::new("edad", FieldType::Integer));
    assert_eq!(model.tables, vec![expected]);
}

#[test]
fn test_all_field_types() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tipos.xlsx");
    write_workbook(
        &path,
        &[(
            "tipos",
            vec![
                vec![
                    Cell::Text("texto"),
                    Cell::Text("activo"),
                    Cell::Text("cantidad"),
                    Cell::Text("precio"),
                    Cell::Text("alta"),
                    Cell::Text("vacio"),
                ],
                vec![
                    Cell::Text("hola"),
                    Cell::Bool(true),
                    Cell::Number(12.0),
                    Cell::Number(3.14),
                    Cell::Date(45000.0),
                    Cell::Blank,
                ],
            ],
        )],
    )
    .unwrap();

    let model = SchemaBuilder::new().build_workbook(&path);
    let table = model.table("tipos").unwrap();

    let types: Vec<(&str, FieldType)> = table
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.field_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("texto", FieldType::String),
            ("activo", FieldType::Boolean),
            ("cantidad", FieldType::Integer),
            ("precio", FieldType::Decimal),
            ("alta", FieldType::Date),
            ("vacio", FieldType::Unknown),
        ]
    );
}

#[test]
fn test_header_only_sheet_is_all_unknown() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cabecera.xlsx");
    write_workbook(
        &path,
        &[("solo_cabecera", vec![vec![Cell::Text("a"), Cell::Text("b")]])],
    )
    .unwrap();

    let model = SchemaBuilder::new().build_workbook(&path);
    let table = model.table("solo_cabecera").unwrap();

    assert_eq!(table.fields.len(), 2);
    assert!(table
        .fields
        .iter()
        .all(|f| f.field_type == FieldType::Unknown));
}

#[test]
fn test_multiple_sheets_keep_workbook_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("varias.xlsx");
    write_workbook(
        &path,
        &[
            (
                "clientes",
                vec![
                    vec![Cell::Text("nombre")],
                    vec![Cell::Text("ACME")],
                ],
            ),
            // 第一行为空: 无表头，跳过
            (
                "rota",
                vec![vec![], vec![Cell::Text("dato")]],
            ),
            (
                "pedidos",
                vec![
                    vec![Cell::Text("importe")],
                    vec![Cell::Number(10.5)],
                ],
            ),
        ],
    )
    .unwrap();

    let model = SchemaBuilder::new().build_workbook(&path);

    let names: Vec<&str> = model.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["clientes", "pedidos"]);
    assert_eq!(
        model.table("pedidos").unwrap().fields[0].field_type,
        FieldType::Decimal
    );
}

#[test]
fn test_missing_file_yields_empty_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_existe.xlsx");

    let builder = SchemaBuilder::new();
    assert!(builder.build_workbook(&path).is_empty());
    assert!(matches!(
        builder.try_build_workbook(&path),
        Err(ImportError::FileNotFound(_))
    ));
}

#[test]
fn test_printed_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alumnos.xlsx");
    write_workbook(
        &path,
        &[(
            "alumnos",
            vec![
                vec![Cell::Text("nombre"), Cell::Text("edad")],
                vec![Cell::Text("Ana"), Cell::Number(30.0)],
            ],
        )],
    )
    .unwrap();

    let printed = SchemaBuilder::new().build_workbook(&path).to_string();

    assert_eq!(printed, "alumnos\n  - nombre: STRING\n  - edad: INTEGER\n");
}
