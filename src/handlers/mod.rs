use crate::error::AppError;
use crate::middlewares::AuthenticatedUser;
use actix_web::{HttpMessage, HttpRequest};

pub mod admin;
pub mod affiliate;
pub mod auth;
pub mod commission;
pub mod order;
pub mod product;
pub mod user;
pub mod wallet;
pub mod webhook;
pub mod withdrawal;

pub use admin::admin_config;
pub use affiliate::{affiliate_config, link_redirect_config};
pub use auth::auth_config;
pub use commission::commission_config;
pub use order::order_config;
pub use product::product_config;
pub use user::user_config;
pub use wallet::wallet_config;
pub use webhook::webhook_config;
pub use withdrawal::withdrawal_config;

/// Identity injected by the auth middleware; absent on public routes hit
/// without a token.
pub(crate) fn current_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

pub(crate) fn require_admin(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let user = current_user(req)?;
    if !user.is_admin() {
        return Err(AppError::PermissionDenied);
    }
    Ok(user)
}

pub(crate) fn optional_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>().cloned()
}
