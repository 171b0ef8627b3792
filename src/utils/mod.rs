pub mod code_generator;
pub mod email;
pub mod jwt;
pub mod password;

pub use code_generator::{generate_link_slug, generate_payout_reference, generate_referral_code};
pub use email::*;
pub use jwt::*;
pub use password::*;
