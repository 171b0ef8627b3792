use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    AffiliateStatus, CommissionSource, CommissionStatus, OrderWithdrawalStatus, PaymentStatus,
    PayoutStatus, ShipmentStatus, UserRole,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::user::get_profile,
        handlers::user::add_bank,
        handlers::user::list_banks,
        handlers::product::list_products,
        handlers::product::get_product,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::order::checkout,
        handlers::order::verify_payment,
        handlers::order::get_orders,
        handlers::order::list_orders,
        handlers::order::update_shipment,
        handlers::affiliate::apply,
        handlers::affiliate::get_membership,
        handlers::affiliate::update_status,
        handlers::affiliate::create_link,
        handlers::affiliate::get_links,
        handlers::commission::get_commissions,
        handlers::commission::list_commissions,
        handlers::commission::update_status,
        handlers::wallet::get_wallet,
        handlers::withdrawal::create_withdrawal,
        handlers::withdrawal::get_withdrawals,
        handlers::withdrawal::list_withdrawals,
        handlers::withdrawal::process_withdrawal,
        handlers::admin::run_maturation,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            UserResponse,
            UserRole,
            AddBankRequest,
            BankResponse,
            ProductResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductQuery,
            CheckoutItem,
            CheckoutRequest,
            CheckoutResponse,
            VerifyPaymentQuery,
            VerifyPaymentResponse,
            OrderResponse,
            OrderQuery,
            UpdateShipmentRequest,
            PaymentStatus,
            ShipmentStatus,
            OrderWithdrawalStatus,
            AffiliateResponse,
            AffiliateStatus,
            UpdateAffiliateStatusRequest,
            CreateLinkRequest,
            AffiliateLinkResponse,
            CommissionResponse,
            CommissionSource,
            CommissionStatus,
            UpdateCommissionStatusRequest,
            CommissionQuery,
            MaturedCommissionItem,
            SkippedCommissionItem,
            MaturationRunResponse,
            WalletResponse,
            CreateWithdrawalRequest,
            ProcessWithdrawalRequest,
            WithdrawalQuery,
            WithdrawalResponse,
            PayoutStatus,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "user", description = "User profile and payout banks"),
        (name = "product", description = "Book catalog API"),
        (name = "order", description = "Checkout and payment verification"),
        (name = "affiliate", description = "Affiliate program and links"),
        (name = "commission", description = "Commission referral ledger"),
        (name = "wallet", description = "Wallet balances"),
        (name = "withdrawal", description = "Withdrawal requests and payouts"),
        (name = "admin", description = "Admin operations"),
    ),
    info(
        title = "Bookstall Backend API",
        version = "1.0.0",
        description = "Bookselling platform with affiliate commerce: catalog, checkout, commission ledger and payouts",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
