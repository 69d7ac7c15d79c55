// ==========================================
// Excel2Database - 行数据校验
// ==========================================
// 规则: telefono 必须为一个或多个 ASCII 数字（无符号、无分隔符），
//       且不超过 32 位有符号整数上限
// ==========================================

use crate::domain::persona::RejectionReason;

pub struct DqValidator;

impl DqValidator {
    /// 校验并解析电话号码
    pub fn validate_phone(&self, value: &str) -> Result<i32, RejectionReason> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RejectionReason::NonNumericPhone {
                value: value.to_string(),
            });
        }

        // 全数字时唯一可能的解析失败是溢出
        value
            .parse::<i32>()
            .map_err(|_| RejectionReason::PhoneOutOfRange {
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        let validator = DqValidator;
        assert_eq!(validator.validate_phone("612345678"), Ok(612345678));
        assert_eq!(validator.validate_phone("0"), Ok(0));
        assert_eq!(validator.validate_phone("007"), Ok(7));
        assert_eq!(validator.validate_phone("2147483647"), Ok(i32::MAX));
    }

    #[test]
    fn test_non_numeric_phones() {
        let validator = DqValidator;
        for value in ["", "12a34", "+34612345678", "612 345 678", "-5", "6.5", "٣٤"] {
            assert_eq!(
                validator.validate_phone(value),
                Err(RejectionReason::NonNumericPhone {
                    value: value.to_string()
                }),
                "value: {:?}",
                value
            );
        }
    }

    #[test]
    fn test_phone_overflow_rejected() {
        let validator = DqValidator;
        assert_eq!(
            validator.validate_phone("2147483648"),
            Err(RejectionReason::PhoneOutOfRange {
                value: "2147483648".to_string()
            })
        );
    }
}
