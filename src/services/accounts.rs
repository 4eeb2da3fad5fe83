use actix_web::web;
use std::sync::Arc;

use crate::auth::{
    credentials, hash_password, verify_password, LoginRequest, RegisterRequest, TokenService,
};
use crate::error::AppError;
use crate::models::{User, UserProfile};
use crate::store::UserStore;

/// Registration, login and profile lookups.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Creates an account. The password is hashed off the async executor and
    /// never leaves this function in plaintext.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile, AppError> {
        let (email, password) = request.into_credentials()?;

        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "A user with this email already exists".into(),
            ));
        }

        let password_hash = web::block(move || hash_password(&password)).await??;
        let user = User::new(email, password_hash);
        // A concurrent registration can still win the race; the store reports it as Conflict.
        self.users.insert_user(&user).await?;

        log::info!("Registered user {}", user.id);
        Ok(user.into())
    }

    /// Checks credentials and returns a freshly signed token.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        let (email, password) = credentials(request.email, request.password)
            .ok_or_else(|| AppError::BadRequest("Email and password are required".into()))?;

        let user = self
            .users
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::BadRequest("No account is registered with this email".into()))?;

        let password_hash = user.password_hash.clone();
        let valid = web::block(move || verify_password(&password, &password_hash)).await??;
        if !valid {
            log::warn!("Failed login attempt for user {}", user.id);
            return Err(AppError::Unauthorized("Incorrect password".into()));
        }

        self.tokens.issue(&user.id, &user.email)
    }

    /// Looks up the account behind a verified token.
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, AppError> {
        self.users
            .find_user_by_id(user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
