// ==========================================
// Excel2Database - 配置层
// ==========================================
// 职责: 读取 config.properties，解析数据库与文件配置
// 说明: 配置以值对象形式显式传递，不使用全局状态
// ==========================================

pub mod app_config;

// 重导出核心类型
pub use app_config::{
    config_keys, default_db_path, AppConfig, DatabaseConfig, DEFAULT_CONFIG_FILE,
    DEFAULT_IMPORT_FILE,
};
