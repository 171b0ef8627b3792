use crate::services::OrderService;
use actix_web::{HttpResponse, Result, web};
use log::{error, info, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PaystackEvent {
    event: String,
    data: PaystackEventData,
}

#[derive(Debug, Deserialize)]
struct PaystackEventData {
    reference: String,
}

/// Paystack webhook endpoint.
///
/// The event body is only treated as a hint: the referenced transaction is
/// re-verified against the Paystack API before any order state changes, so a
/// forged event cannot mark an order paid.
pub async fn paystack_webhook(
    body: web::Bytes,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse> {
    let event: PaystackEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Undecodable Paystack webhook payload: {e}");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Invalid payload"
            })));
        }
    };

    info!(
        "Received Paystack webhook event: {} ({})",
        event.event, event.data.reference
    );

    match event.event.as_str() {
        "charge.success" => {
            // verify_payment re-checks the transaction server-side and is
            // idempotent for already-paid orders
            match order_service.verify_payment(&event.data.reference).await {
                Ok(_) => info!("Webhook settled order for {}", event.data.reference),
                Err(e) => {
                    // 200 regardless, so Paystack does not retry forever
                    error!(
                        "Webhook processing for {} failed: {e:?}",
                        event.data.reference
                    );
                }
            }
        }
        other => {
            info!("Unhandled Paystack event type: {other}");
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "received": true
    })))
}

pub fn webhook_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/webhook").route("/paystack", web::post().to(paystack_webhook)));
}
