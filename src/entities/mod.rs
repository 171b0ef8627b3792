pub mod affiliate_links;
pub mod affiliates;
pub mod commission_referrals;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod user_banks;
pub mod users;
pub mod wallets;
pub mod withdrawal_requests;

pub use affiliate_links as affiliate_link_entity;
pub use affiliates as affiliate_entity;
pub use commission_referrals as commission_referral_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use products as product_entity;
pub use user_banks as user_bank_entity;
pub use users as user_entity;
pub use wallets as wallet_entity;
pub use withdrawal_requests as withdrawal_request_entity;

pub use affiliates::AffiliateStatus;
pub use commission_referrals::{CommissionSource, CommissionStatus};
pub use orders::{OrderWithdrawalStatus, PaymentStatus, ShipmentStatus};
pub use users::UserRole;
pub use withdrawal_requests::PayoutStatus;
