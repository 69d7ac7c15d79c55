// ==========================================
// Excel2Database - 应用配置
// ==========================================
// 来源: 工作目录下的 config.properties（key=value 文本）
// 红线: 配置缺失/不可读不是致命错误，记录日志后返回空配置
// ==========================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// 默认配置文件名（相对工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "config.properties";

/// 未配置 inputFile 时导入的测试文件
pub const DEFAULT_IMPORT_FILE: &str = "datos/test.xlsx";

/// 显式指定数据库路径的环境变量
pub const DB_PATH_ENV: &str = "EXCEL2DB_DB_PATH";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 连接
    pub const HOST: &str = "host";
    pub const PORT: &str = "port";
    pub const DATABASE: &str = "database";
    pub const USER: &str = "user";
    pub const PASSWORD: &str = "password";
    pub const DRIVER: &str = "driver";

    // 文件
    pub const FILE: &str = "file";
    pub const OUTPUT_FILE: &str = "outputFile";
    pub const INPUT_FILE: &str = "inputFile";

    // 透传连接选项
    pub const USE_SSL: &str = "useSSL";
    pub const SERVER_TIMEZONE: &str = "serverTimezone";
    pub const ALLOW_PUBLIC_KEY_RETRIEVAL: &str = "allowPublicKeyRetrieval";
    pub const USE_UNICODE: &str = "useUnicode";
    pub const USE_JDBC_COMPLIANT_TIMEZONE_SHIFT: &str = "useJDBCCompliantTimezoneShift";

    /// SQLite 不使用的服务器连接参数
    pub const SERVER_KEYS: [&str; 4] = [HOST, PORT, USER, PASSWORD];

    pub const PASSTHROUGH_OPTIONS: [&str; 5] = [
        USE_SSL,
        SERVER_TIMEZONE,
        ALLOW_PUBLIC_KEY_RETRIEVAL,
        USE_UNICODE,
        USE_JDBC_COMPLIANT_TIMEZONE_SHIFT,
    ];
}

// ==========================================
// DatabaseConfig - 数据库连接配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite 数据库文件路径
    pub path: PathBuf,
    /// 已配置但不适用于 SQLite 的键
    pub ignored_keys: Vec<&'static str>,
}

impl DatabaseConfig {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ignored_keys: Vec::new(),
        }
    }
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    properties: BTreeMap<String, String>,
}

impl AppConfig {
    /// 从 key=value 文件加载配置
    ///
    /// # 说明
    /// - 文件不存在或读取失败: 记录日志并返回空配置
    /// - 单行解析失败: 记录警告并跳过该行
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                warn!(path = %path.display(), "找不到配置文件，使用空配置");
                return Self::default();
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "读取配置文件失败，使用空配置");
                return Self::default();
            }
        };

        let mut properties = BTreeMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    properties.insert(key, value);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "配置行解析失败，已跳过");
                }
            }
        }

        info!(path = %path.display(), keys = properties.len(), "配置加载完成");
        Self { properties }
    }

    /// 从键值对构造（测试与嵌入场景）
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 读取配置值（空白值视为未配置）
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// 需要做模式推断的工作簿（file）
    pub fn workbook_file(&self) -> Option<PathBuf> {
        self.get(config_keys::FILE).map(PathBuf::from)
    }

    /// 需要导入的工作簿（inputFile，缺省为 datos/test.xlsx）
    pub fn import_file(&self) -> PathBuf {
        PathBuf::from(
            self.get(config_keys::INPUT_FILE)
                .unwrap_or(DEFAULT_IMPORT_FILE),
        )
    }

    pub fn output_file(&self) -> Option<PathBuf> {
        self.get(config_keys::OUTPUT_FILE).map(PathBuf::from)
    }

    /// 已配置的透传连接选项
    pub fn passthrough_options(&self) -> Vec<(&'static str, &str)> {
        config_keys::PASSTHROUGH_OPTIONS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (*key, v)))
            .collect()
    }

    /// 解析数据库连接配置
    ///
    /// # 路径规则
    /// - database 已配置: 作为 SQLite 文件路径（无扩展名时追加 .db）
    /// - 否则: 环境变量 EXCEL2DB_DB_PATH → 用户数据目录 → ./excel2database.db
    pub fn database_config(&self) -> DatabaseConfig {
        if let Some(driver) = self.get(config_keys::DRIVER) {
            if !driver.eq_ignore_ascii_case("sqlite") {
                warn!(driver = driver, "不支持的驱动，使用 SQLite");
            }
        }

        let path = match self.get(config_keys::DATABASE) {
            Some(database) => {
                let mut path = PathBuf::from(database);
                if path.extension().is_none() {
                    path.set_extension("db");
                }
                path
            }
            None => default_db_path(),
        };

        let ignored_keys: Vec<&'static str> = config_keys::SERVER_KEYS
            .iter()
            .chain(config_keys::PASSTHROUGH_OPTIONS.iter())
            .filter(|key| self.get(key).is_some())
            .copied()
            .collect();

        debug!(path = %path.display(), ignored = ?ignored_keys, "数据库配置解析完成");
        DatabaseConfig { path, ignored_keys }
    }
}

/// 默认数据库路径
pub fn default_db_path() -> PathBuf {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("excel2database").join("excel2database.db"),
        None => PathBuf::from("./excel2database.db"),
    }
}
