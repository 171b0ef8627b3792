use crate::handlers::require_admin;
use crate::services::MaturationService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/commissions/mature",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Maturation run report"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn run_maturation(
    maturation_service: web::Data<MaturationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    // same code path as the nightly job; exposed for operational recovery
    match maturation_service.run().await {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": report,
            "message": "Maturation run completed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin").route("/commissions/mature", web::post().to(run_maturation)),
    );
}
