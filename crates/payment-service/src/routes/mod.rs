pub mod health;
pub mod payment;

use actix_web::HttpResponse;

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type("text/plain; charset=utf-8")
        .body("Method not allowed")
}
