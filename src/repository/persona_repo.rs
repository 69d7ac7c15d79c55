// ==========================================
// Excel2Database - 人员仓储接口
// ==========================================
// 职责: 定义 personas 表的数据访问接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::persona::Persona;
use crate::repository::error::RepositoryResult;

/// 目标表名
pub const PERSONAS_TABLE: &str = "personas";

// ==========================================
// PersonaRepository Trait
// ==========================================
// 实现者: PersonaRepositoryImpl
pub trait PersonaRepository {
    /// 创建 personas 表（已存在则跳过）
    fn create_table_if_missing(&self) -> RepositoryResult<()>;

    /// 统计指定 email 的行数
    fn count_by_email(&self, email: &str) -> RepositoryResult<i64>;

    /// email 是否已存在
    fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.count_by_email(email)? > 0)
    }

    /// 批量插入
    ///
    /// # 返回
    /// - Ok(usize): 写入行数
    /// - Err: 任一行写入失败（由调用方回滚整个事务）
    fn batch_insert(&self, personas: &[Persona]) -> RepositoryResult<usize>;

    /// 表内总行数
    fn count(&self) -> RepositoryResult<i64>;
}
