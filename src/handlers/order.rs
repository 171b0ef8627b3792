use crate::handlers::{current_user, optional_user, require_admin};
use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/orders/checkout",
    tag = "order",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order created, redirect buyer to authorization_url", body = CheckoutResponse),
        (status = 400, description = "Invalid order")
    )
)]
pub async fn checkout(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    // guest checkout is allowed; a logged-in buyer gets the order on their account
    let user_id = optional_user(&req).map(|u| u.id);

    match order_service.checkout(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/verify",
    tag = "order",
    params(
        ("reference" = String, Query, description = "Paystack transaction reference")
    ),
    responses(
        (status = 200, description = "Payment state after verification", body = VerifyPaymentResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn verify_payment(
    order_service: web::Data<OrderService>,
    query: web::Query<VerifyPaymentQuery>,
) -> Result<HttpResponse> {
    match order_service.verify_payment(&query.reference).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Orders of the current user"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.get_user_orders(user.id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/all",
    tag = "order",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All orders"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match order_service.list_orders(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/shipment",
    tag = "order",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    request_body = UpdateShipmentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Shipment status updated", body = OrderResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_shipment(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateShipmentRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match order_service
        .update_shipment_status(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("/checkout", web::post().to(checkout))
            .route("/verify", web::get().to(verify_payment))
            .route("/all", web::get().to(list_orders))
            .route("", web::get().to(get_orders))
            .route("/{id}/shipment", web::patch().to(update_shipment)),
    );
}
