use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use moneypal_common::types::NotificationRecord;
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::pagination::PaginationParams;
use crate::api::{error_response, success_paginated_response, ApiError, PaginatedData};
use crate::logging::TraceId;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
struct NotificationListParams {
    /// Owner whose ledger entries to list.
    user_id: String,
}

/// List a user's notifications, newest first.
#[utoipa::path(
    get,
    path = "/v1/notifications",
    tag = "Notifications",
    params(NotificationListParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated ledger entries", body = PaginatedData<NotificationRecord>),
        (status = 400, description = "Missing or empty user_id", body = ApiError)
    )
)]
async fn list_notifications(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Query(params): Query<NotificationListParams>,
    Query(page): Query<PaginationParams>,
) -> impl IntoResponse {
    if params.user_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            &trace_id,
            "bad_request",
            "user_id must not be empty",
        );
    }

    let (limit, offset) = (page.limit(), page.offset());

    let items = match state
        .store
        .list_notifications_for_user(&params.user_id, limit, offset)
        .await
    {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "notification listing failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                &e.to_string(),
            );
        }
    };
    let total = match state
        .store
        .count_notifications_for_user(&params.user_id)
        .await
    {
        Ok(total) => total,
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "notification count failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                &e.to_string(),
            );
        }
    };

    success_paginated_response(StatusCode::OK, &trace_id, items, total, limit, offset)
}

pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_notifications))
}
