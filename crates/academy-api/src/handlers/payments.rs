//! Checkout handlers

use academy_service::dto::{
    ConfirmPaymentRequest, ConfirmPaymentResponse, PaymentIntentRequest, PaymentIntentResponse,
};
use academy_service::services::CheckoutService;
use axum::{extract::State, Json};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Start paying for a course
///
/// POST /payments/intent
pub async fn create_payment_intent(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<PaymentIntentRequest>,
) -> ApiResult<Json<PaymentIntentResponse>> {
    let service = CheckoutService::new(state.service_context());
    let response = service.create_payment_intent(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Enroll after the client completed the payment
///
/// POST /payments/confirm
pub async fn confirm_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ConfirmPaymentRequest>,
) -> ApiResult<Json<ConfirmPaymentResponse>> {
    let service = CheckoutService::new(state.service_context());
    let response = service.confirm_payment(auth.user_id, request).await?;
    Ok(Json(response))
}
