use crate::{
    auth::{AuthMiddleware, AuthenticatedUser, LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new account. The response never contains the password or its hash.
///
/// ## Responses:
/// - `201 Created`: `{ "message": ... }`
/// - `400 Bad Request`: email or password missing, or email malformed.
/// - `409 Conflict`: the email is already registered.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    state.accounts.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// Login user
///
/// Authenticates a user and returns a bearer token valid for the configured window.
///
/// ## Responses:
/// - `200 OK`: `{ "message": ..., "token": ... }`
/// - `400 Bad Request`: fields missing or no account for this email.
/// - `401 Unauthorized`: wrong password.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = state.accounts.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// Current user's profile
///
/// ## Responses:
/// - `200 OK`: `{ "id", "email", "createdAt" }`
/// - `401 Unauthorized` / `403 Forbidden`: missing or invalid bearer token.
/// - `404 Not Found`: the account behind the token no longer exists.
#[get("/me", wrap = "AuthMiddleware")]
pub async fn me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = state.accounts.profile(&user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
