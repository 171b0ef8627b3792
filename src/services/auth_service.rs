use crate::entities::{UserRole, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::utils::{
    JwtService, generate_referral_code, hash_password, validate_email, validate_password,
    verify_password,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&request.email))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        // referrer_code is informational at registration time; commission
        // attribution happens per order, not per signup
        if let Some(code) = &request.referrer_code {
            let referrer = users::Entity::find()
                .filter(users::Column::ReferralCode.eq(code))
                .one(&self.pool)
                .await?;
            if referrer.is_none() {
                return Err(AppError::ValidationError(
                    "Unknown referrer code".to_string(),
                ));
            }
        }

        let password_hash = hash_password(&request.password)?;
        let referral_code = self.generate_unique_referral_code().await?;

        let user = users::ActiveModel {
            name: Set(request.name),
            email: Set(request.email),
            password_hash: Set(password_hash),
            role: Set(UserRole::Customer),
            referral_code: Set(Some(referral_code)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.build_auth_response(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(&request.email))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid email or password".to_string(),
            ));
        }

        self.build_auth_response(user)
    }

    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.build_auth_response(user)
    }

    fn build_auth_response(&self, user: users::Model) -> AppResult<AuthResponse> {
        let role = user.role.to_string();
        let access_token = self.jwt_service.generate_access_token(user.id, &role)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, &role)?;
        let expires_in = self.jwt_service.get_access_token_expires_in();

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in,
        })
    }

    async fn generate_unique_referral_code(&self) -> AppResult<String> {
        loop {
            let code = generate_referral_code();
            let exists = users::Entity::find()
                .filter(users::Column::ReferralCode.eq(&code))
                .one(&self.pool)
                .await?;
            if exists.is_none() {
                return Ok(code);
            }
        }
    }
}
