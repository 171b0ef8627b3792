pub mod affiliate_service;
pub mod auth_service;
pub mod commission_service;
pub mod maturation_service;
pub mod order_service;
pub mod product_service;
pub mod user_service;
pub mod wallet_service;
pub mod withdrawal_service;

pub use affiliate_service::*;
pub use auth_service::*;
pub use commission_service::*;
pub use maturation_service::*;
pub use order_service::*;
pub use product_service::*;
pub use user_service::*;
pub use wallet_service::*;
pub use withdrawal_service::*;
