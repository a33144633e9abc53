use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 사용자 생성 요청 본문
///
/// 누락된 필드는 빈 문자열로 채워집니다. 따라서 필드가 빠진 요청은 바인딩이 아니라
/// 검증 단계에서 거부됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    /// 사용자명 (1-255자, ASCII 영문/숫자)
    #[validate(length(min = 1, max = 255, message = "username must be 1-255 characters"))]
    #[validate(custom(function = "validate_alphanum"))]
    pub username: String,

    /// 비밀번호 (6-18자)
    #[validate(length(min = 6, max = 18, message = "password must be 6-18 characters"))]
    pub password: String,

    /// 닉네임 (1-255자)
    #[validate(length(min = 1, max = 255, message = "nickname must be 1-255 characters"))]
    pub nickname: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    /// 휴대전화 번호 (정확히 11자)
    #[validate(length(equal = 11, message = "phone must be exactly 11 characters"))]
    pub phone: String,
}

/// ASCII 영문자와 숫자만 허용
fn validate_alphanum(value: &str) -> Result<(), ValidationError> {
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("alphanum")
            .with_message("username must contain only letters and digits".into()));
    }
    Ok(())
}
