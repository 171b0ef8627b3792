use crate::handlers::{current_user, require_admin};
use crate::models::*;
use crate::services::CommissionService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/commissions",
    tag = "commission",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by commission status")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Commissions earned by the current user"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_commissions(
    commission_service: web::Data<CommissionService>,
    req: HttpRequest,
    query: web::Query<CommissionQuery>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match commission_service.get_user_commissions(user.id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/commissions/all",
    tag = "commission",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by commission status")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All commission referrals"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_commissions(
    commission_service: web::Data<CommissionService>,
    req: HttpRequest,
    query: web::Query<CommissionQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match commission_service.list_commissions(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/commissions/{id}/status",
    tag = "commission",
    params(
        ("id" = i64, Path, description = "Commission referral id")
    ),
    request_body = UpdateCommissionStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Commission settled", body = CommissionResponse),
        (status = 400, description = "Commission is not awaiting approval"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Commission not found")
    )
)]
pub async fn update_status(
    commission_service: web::Data<CommissionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateCommissionStatusRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match commission_service
        .update_status(path.into_inner(), request.into_inner().status)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn commission_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/commissions")
            .route("/all", web::get().to(list_commissions))
            .route("", web::get().to(get_commissions))
            .route("/{id}/status", web::patch().to(update_status)),
    );
}
