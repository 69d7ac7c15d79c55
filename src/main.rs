// ==========================================
// Excel2Database - 命令行入口
// ==========================================
// 流程:
// 1. 初始化日志，读取 config.properties
// 2. 创建数据库（不存在时）
// 3. 推断 file 指定工作簿的模式并打印
// 4. 将 inputFile 导入 personas 表
// 无命令行参数；任何失败只记录日志，进程正常退出
// ==========================================

use anyhow::{Context, Result};
use excel2database::config::{AppConfig, DEFAULT_CONFIG_FILE};
use excel2database::db::ConnectionProvider;
use excel2database::domain::ImportOutcome;
use excel2database::engine::ImportOrchestrator;
use excel2database::importer::SchemaBuilder;
use excel2database::logging;
use std::path::Path;

fn main() {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", excel2database::APP_NAME, excel2database::VERSION);
    tracing::info!("==================================================");

    if let Err(e) = run() {
        tracing::error!(error = ?e, "执行失败");
        eprintln!("Error: {:#}", e);
    }
}

fn run() -> Result<()> {
    let config = AppConfig::load(DEFAULT_CONFIG_FILE);
    let db_config = config.database_config();

    let provider = ConnectionProvider::new(&db_config);
    if let Err(e) = provider.create_database_if_missing() {
        tracing::error!(error = %e, "创建数据库失败");
    }

    if let Some(workbook_file) = config.workbook_file() {
        print_schema(&workbook_file, config.output_file().as_deref())?;
    }

    let import_file = config.import_file();
    let conn = provider
        .get_connection()
        .context("无法获取数据库连接")?;

    let mut orchestrator = ImportOrchestrator::new(&conn);
    match orchestrator.import_file(&import_file) {
        Ok(ImportOutcome::Imported(summary)) => {
            println!(
                "Importación completada: {} filas insertadas en personas (hoja '{}')",
                summary.rows_imported, summary.sheet_name
            );
        }
        Ok(ImportOutcome::Rejected(rejection)) => {
            eprintln!("Importación cancelada. Motivo: {}", rejection);
        }
        Err(e) => {
            eprintln!("Importación cancelada. Motivo: {}", e);
        }
    }

    tracing::info!(state = %orchestrator.state(), "导入流程结束");
    Ok(())
}

/// 推断并打印工作簿模式；配置了 outputFile 时另存 JSON
fn print_schema(workbook_file: &Path, output_file: Option<&Path>) -> Result<()> {
    let model = SchemaBuilder::new().build_workbook(workbook_file);

    println!("---TABLAS---");
    print!("{}", model);

    let json = model.to_json().context("模式序列化失败")?;
    tracing::debug!(schema = %json, "工作簿模式");

    if let Some(output_file) = output_file {
        std::fs::write(output_file, &json)
            .with_context(|| format!("无法写入 {}", output_file.display()))?;
        tracing::info!(path = %output_file.display(), "模式已写入");
    }

    Ok(())
}
