// ==========================================
// Excel2Database - 人员仓储实现
// ==========================================
// 职责: 实现 personas 表的数据访问（使用 rusqlite）
// 说明: 借用调用方持有的连接，事务边界由编排器管理
// ==========================================

use crate::domain::persona::{Gender, Persona};
use crate::repository::error::RepositoryResult;
use crate::repository::persona_repo::{PersonaRepository, PERSONAS_TABLE};
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// 生成 personas 表 DDL
///
/// genero 的取值范围由 CHECK 约束在写入时强制
pub fn personas_ddl() -> String {
    let genders = Gender::ALL
        .iter()
        .map(|g| format!("'{}'", g.as_str()))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre VARCHAR(50),
            apellidos VARCHAR(80),
            email VARCHAR(100),
            telefono INTEGER,
            genero TEXT CHECK (genero IN ({genders}))
        )
        "#,
        table = PERSONAS_TABLE,
        genders = genders,
    )
}

// ==========================================
// PersonaRepositoryImpl
// ==========================================
pub struct PersonaRepositoryImpl<'c> {
    conn: &'c Connection,
}

impl<'c> PersonaRepositoryImpl<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// 按 email 查询（用于导入后核对）
    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Vec<Persona>> {
        let mut stmt = self.conn.prepare(
            "SELECT nombre, apellidos, email, telefono, genero FROM personas WHERE email = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![email], |row| {
            Ok(Persona {
                nombre: row.get(0)?,
                apellidos: row.get(1)?,
                email: row.get(2)?,
                telefono: row.get(3)?,
                genero: row.get(4)?,
            })
        })?;

        let mut personas = Vec::new();
        for row in rows {
            personas.push(row?);
        }
        Ok(personas)
    }
}

impl PersonaRepository for PersonaRepositoryImpl<'_> {
    fn create_table_if_missing(&self) -> RepositoryResult<()> {
        self.conn.execute_batch(&personas_ddl())?;
        info!(table = PERSONAS_TABLE, "目标表已验证/创建");
        Ok(())
    }

    fn count_by_email(&self, email: &str) -> RepositoryResult<i64> {
        // 每行调用一次，使用语句缓存
        let mut stmt = self
            .conn
            .prepare_cached("SELECT COUNT(*) FROM personas WHERE email = ?1")?;
        let count: i64 = stmt.query_row(params![email], |row| row.get(0))?;
        Ok(count)
    }

    fn batch_insert(&self, personas: &[Persona]) -> RepositoryResult<usize> {
        let mut stmt = self.conn.prepare(
            r#"
            INSERT INTO personas (nombre, apellidos, email, telefono, genero)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;

        let mut count = 0;
        for persona in personas {
            stmt.execute(params![
                persona.nombre,
                persona.apellidos,
                persona.email,
                persona.telefono,
                persona.genero,
            ])?;
            count += 1;
        }

        debug!(count = count, "批量写入完成");
        Ok(count)
    }

    fn count(&self) -> RepositoryResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM personas", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::RepositoryError;

    fn persona(email: &str, genero: &str) -> Persona {
        Persona {
            nombre: "Ana".to_string(),
            apellidos: "García López".to_string(),
            email: email.to_string(),
            telefono: 612345678,
            genero: genero.to_string(),
        }
    }

    #[test]
    fn test_create_table_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        let repo = PersonaRepositoryImpl::new(&conn);

        repo.create_table_if_missing().unwrap();
        repo.create_table_if_missing().unwrap();

        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_batch_insert_and_lookup() {
        let conn = Connection::open_in_memory().unwrap();
        let repo = PersonaRepositoryImpl::new(&conn);
        repo.create_table_if_missing().unwrap();

        let inserted = repo
            .batch_insert(&[
                persona("ana@example.com", "FEMENINO"),
                persona("luis@example.com", "MASCULINO"),
            ])
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(repo.count().unwrap(), 2);
        assert!(repo.email_exists("ana@example.com").unwrap());
        assert!(!repo.email_exists("otro@example.com").unwrap());

        let found = repo.find_by_email("luis@example.com").unwrap();
        assert_eq!(found, vec![persona("luis@example.com", "MASCULINO")]);
    }

    #[test]
    fn test_check_constraint_rejects_unknown_gender() {
        let conn = Connection::open_in_memory().unwrap();
        let repo = PersonaRepositoryImpl::new(&conn);
        repo.create_table_if_missing().unwrap();

        let result = repo.batch_insert(&[persona("ana@example.com", "DESCONOCIDO")]);

        assert!(matches!(
            result,
            Err(RepositoryError::CheckConstraintViolation(_))
        ));
    }
}
