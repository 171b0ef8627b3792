use crate::handlers::{current_user, require_admin};
use crate::models::*;
use crate::services::AffiliateService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/affiliates/apply",
    tag = "affiliate",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Application submitted", body = AffiliateResponse),
        (status = 400, description = "Already applied")
    )
)]
pub async fn apply(
    affiliate_service: web::Data<AffiliateService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match affiliate_service.apply(user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/affiliates/me",
    tag = "affiliate",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current membership", body = AffiliateResponse),
        (status = 404, description = "Not an affiliate")
    )
)]
pub async fn get_membership(
    affiliate_service: web::Data<AffiliateService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match affiliate_service.get_membership(user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/affiliates/{id}/status",
    tag = "affiliate",
    params(
        ("id" = i64, Path, description = "Affiliate id")
    ),
    request_body = UpdateAffiliateStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Membership status updated", body = AffiliateResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Affiliate not found")
    )
)]
pub async fn update_status(
    affiliate_service: web::Data<AffiliateService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateAffiliateStatusRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match affiliate_service
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

#[utoipa::path(
    post,
    path = "/affiliates/links",
    tag = "affiliate",
    request_body = CreateLinkRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Link created (or existing one returned)", body = AffiliateLinkResponse),
        (status = 400, description = "Membership not approved")
    )
)]
pub async fn create_link(
    affiliate_service: web::Data<AffiliateService>,
    req: HttpRequest,
    request: web::Json<CreateLinkRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match affiliate_service
        .create_link(user.id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/affiliates/links",
    tag = "affiliate",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Links of the current affiliate")
    )
)]
pub async fn get_links(
    affiliate_service: web::Data<AffiliateService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match affiliate_service.get_user_links(user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Public link redirect: counts the click and bounces the visitor to the
/// product page with the slug attached for checkout attribution.
pub async fn follow_link(
    affiliate_service: web::Data<AffiliateService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    match affiliate_service.record_click(&slug).await {
        Ok(product_id) => Ok(HttpResponse::Found()
            .append_header((
                "Location",
                format!("/api/v1/products/{product_id}?ref={slug}"),
            ))
            .finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn affiliate_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/affiliates")
            .route("/apply", web::post().to(apply))
            .route("/me", web::get().to(get_membership))
            .route("/links", web::post().to(create_link))
            .route("/links", web::get().to(get_links))
            .route("/{id}/status", web::patch().to(update_status)),
    );
}

/// Mounted at the root scope so shared links stay short.
pub fn link_redirect_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/l/{slug}", web::get().to(follow_link));
}
