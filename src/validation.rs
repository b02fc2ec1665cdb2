use crate::error::AppError;

pub const MISSING_CREDENTIALS: &str = "Please enter username and password";

pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.is_empty() || password.is_empty() {
        Err(AppError::Validation(MISSING_CREDENTIALS))
    } else {
        Ok(())
    }
}

/// Post-login destination: only local absolute paths are honoured.
pub fn safe_redirect_target(from: Option<&str>) -> &str {
    match from {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/landing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("ana", "secret").is_ok());
        assert!(matches!(
            validate_credentials("", "secret"),
            Err(AppError::Validation(MISSING_CREDENTIALS))
        ));
        assert!(validate_credentials("ana", "").is_err());
        assert!(validate_credentials("", "").is_err());
    }

    #[test]
    fn test_safe_redirect_target() {
        assert_eq!(safe_redirect_target(Some("/class/3")), "/class/3");
        assert_eq!(safe_redirect_target(Some("/landing?day=tue")), "/landing?day=tue");
        assert_eq!(safe_redirect_target(Some("//evil.example")), "/landing");
        assert_eq!(safe_redirect_target(Some("https://evil.example")), "/landing");
        assert_eq!(safe_redirect_target(None), "/landing");
    }

    #[test]
    fn test_safe_redirect_target_rejects_control_chars() {
        // Browsers drop tab/CR/LF from Location, turning these into `//host`.
        assert_eq!(safe_redirect_target(Some("/\t/evil.example")), "/landing");
        assert_eq!(safe_redirect_target(Some("/\n/evil.example")), "/landing");
        assert_eq!(safe_redirect_target(Some("/\r\n/evil.example")), "/landing");
        assert_eq!(safe_redirect_target(Some("/class/3\u{0}")), "/landing");
    }
}
