use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{User, UserRole};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7 and 20 characters"))]
    pub phone: Option<String>,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,

    #[validate(custom = "validate_signup_role")]
    pub role: Option<UserRole>,
}

fn validate_signup_role(role: &UserRole) -> Result<(), validator::ValidationError> {
    match role {
        UserRole::User | UserRole::Landlord => Ok(()),
        UserRole::Admin => Err(validator::ValidationError::new("invalid_role")),
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Email is required"), email(message = "Email is invalid"))]
    pub email: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub identity_verified: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            phone: user.phone.clone(),
            role: user.role.to_str().to_string(),
            email_verified: user.email_verified,
            phone_verified: user.phone_verified,
            identity_verified: user.identity_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7 and 20 characters"))]
    pub phone: Option<String>,
}

#[derive(Debug, Validate, Default, Clone, Serialize, Deserialize)]
pub struct UserPasswordUpdateDto {
    #[validate(
        length(min = 1, message = "New password is required."),
        length(min = 6, message = "new password must be at least 6 characters")
    )]
    pub new_password: String,

    #[validate(
        length(min = 1, message = "New password confirm is required."),
        must_match(other = "new_password", message = "new passwords do not match")
    )]
    pub new_password_confirm: String,

    #[validate(length(min = 1, message = "Old password is required."))]
    pub old_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_dto() -> RegisterUserDto {
        RegisterUserDto {
            name: "Ada Obi".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+2348012345678".to_string()),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
            role: Some(UserRole::Landlord),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register_dto().validate().is_ok());
    }

    #[test]
    fn registration_requires_matching_passwords() {
        let mut dto = register_dto();
        dto.password_confirm = "different".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors
            .field_errors()
            .values()
            .any(|errs| errs.iter().any(|e| e.code == "must_match")));
    }

    #[test]
    fn registration_cannot_claim_admin() {
        let mut dto = register_dto();
        dto.role = Some(UserRole::Admin);
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn registration_rejects_bad_email() {
        let mut dto = register_dto();
        dto.email = "ada.example.com".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_reads_camel_case_confirm() {
        let dto: RegisterUserDto = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret123",
            "passwordConfirm": "secret123"
        }))
        .unwrap();
        assert_eq!(dto.password_confirm, "secret123");
        assert!(dto.role.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn filtered_user_never_carries_password() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            password: "$argon2id$hash".to_string(),
            role: UserRole::User,
            email_verified: true,
            phone_verified: false,
            identity_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let filtered = serde_json::to_value(FilterUserDto::filter_user(&user)).unwrap();
        assert!(filtered.get("password").is_none());
        assert_eq!(filtered["role"], "user");

        let raw = serde_json::to_value(&user).unwrap();
        assert!(raw.get("password").is_none());
    }
}
