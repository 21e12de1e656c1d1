use actix_web::{web, HttpResponse};

use crate::classifier;
use crate::error::PaymentError;
use crate::routes::method_not_allowed;
use crate::state::AppState;

/// POST /paymentAuth - Authorize a payment
///
/// Always 200 with a decision once the body decodes, including gateway
/// failures. A body that does not decode is answered with 400.
pub async fn payment_auth(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, PaymentError> {
    let decision = classifier::classify(&body, state.gateway.as_ref()).await?;
    Ok(HttpResponse::Ok().json(decision))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/paymentAuth")
            .route(web::post().to(payment_auth))
            .default_service(web::to(method_not_allowed)),
    );
}
