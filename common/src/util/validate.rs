use validator::ValidationError;

/// ✅ 必填校验：去除空白后不能为空
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("must not be blank".into()));
    }
    Ok(())
}

/// ✅ 路径参数校验：用户 ID 不能为空且不能含空白
pub fn validate_user_id(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("user_id").with_message("must not contain whitespace".into()));
    }
    Ok(())
}
