// ==========================================
// Excel2Database - 重复 email 检测
// ==========================================
// 规则: 目标表中已存在的 email → 整批拒绝
// 说明: 这是写入前的预检查，只查询目标表；
//       同一工作表内暂存的行尚未写入，不参与检测
// ==========================================

use crate::domain::persona::RejectionReason;
use crate::repository::error::RepositoryResult;
use crate::repository::PersonaRepository;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ConflictHandler;

impl ConflictHandler {
    pub fn new() -> Self {
        Self
    }

    /// 检查一行的 email 是否已存在于目标表
    ///
    /// # 返回
    /// - Ok(None): 无冲突
    /// - Ok(Some(reason)): 冲突原因
    pub fn check<R: PersonaRepository>(
        &self,
        repo: &R,
        email: &str,
        row_number: usize,
    ) -> RepositoryResult<Option<RejectionReason>> {
        if repo.email_exists(email)? {
            debug!(email = email, row_number = row_number, "email 已存在于目标表");
            return Ok(Some(RejectionReason::DuplicateEmail {
                email: email.to_string(),
            }));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::persona::Persona;
    use crate::repository::PersonaRepositoryImpl;
    use rusqlite::Connection;

    #[test]
    fn test_check_against_table() {
        let conn = Connection::open_in_memory().unwrap();
        let repo = PersonaRepositoryImpl::new(&conn);
        repo.create_table_if_missing().unwrap();
        repo.batch_insert(&[Persona {
            nombre: "Ana".to_string(),
            apellidos: "Ruiz".to_string(),
            email: "ana@x.com".to_string(),
            telefono: 600000000,
            genero: "FEMENINO".to_string(),
        }])
        .unwrap();

        let handler = ConflictHandler::new();
        assert_eq!(
            handler.check(&repo, "ana@x.com", 2).unwrap(),
            Some(RejectionReason::DuplicateEmail {
                email: "ana@x.com".to_string()
            })
        );
        assert_eq!(handler.check(&repo, "luis@x.com", 3).unwrap(), None);
        // 重复检查同一 email 不改变结果
        assert_eq!(handler.check(&repo, "luis@x.com", 4).unwrap(), None);
    }
}
