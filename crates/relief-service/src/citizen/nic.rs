//! National identity card number checks.

use relief_core::error::AppError;

/// Trim and uppercase a NIC, rejecting anything that is not a valid
/// old-format (nine digits plus `V` or `X`) or new-format (twelve digits)
/// number.
pub fn normalize_nic(raw: &str) -> Result<String, AppError> {
    let nic = raw.trim().to_ascii_uppercase();
    let valid = match nic.len() {
        12 => nic.bytes().all(|b| b.is_ascii_digit()),
        10 => {
            let (digits, suffix) = nic.split_at(9);
            digits.bytes().all(|b| b.is_ascii_digit()) && matches!(suffix, "V" | "X")
        }
        _ => false,
    };
    if valid {
        Ok(nic)
    } else {
        Err(AppError::validation(format!("Invalid NIC number: '{}'", raw.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_formats() {
        assert_eq!(normalize_nic(" 852345678v ").unwrap(), "852345678V");
        assert_eq!(normalize_nic("852345678X").unwrap(), "852345678X");
        assert_eq!(normalize_nic("199912345678").unwrap(), "199912345678");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "85234567V", "852345678Q", "19991234567A", "ABCDEFGHIJKL"] {
            assert!(normalize_nic(bad).is_err(), "{bad} should be rejected");
        }
    }
}
