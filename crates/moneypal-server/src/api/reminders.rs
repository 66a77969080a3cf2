use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use moneypal_alert::day::EvaluationDay;
use moneypal_alert::summary::PassSummary;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::{error_response, success_response, ApiError};
use crate::logging::TraceId;
use crate::reminders::{self, PassError};
use crate::state::AppState;

fn pass_error_response(trace_id: &str, err: &PassError) -> Response {
    match err {
        PassError::Storage(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            trace_id,
            "storage_error",
            &err.to_string(),
        ),
        PassError::Mail(_) => error_response(
            StatusCode::BAD_GATEWAY,
            trace_id,
            "mail_error",
            &err.to_string(),
        ),
    }
}

/// Run the budget-alert pass now.
///
/// Shares the scheduled jobs' code path; the per-entity same-day ledger
/// check keeps a manual run from double-sending alongside the schedule. A
/// failed pass is reported as an error, never as a zero count.
#[utoipa::path(
    post,
    path = "/v1/admin/reminders/budgets/run",
    tag = "Reminders",
    responses(
        (status = 200, description = "Pass summary with the sent count", body = PassSummary),
        (status = 500, description = "Pass aborted by a storage failure", body = ApiError),
        (status = 502, description = "Pass aborted by a mail transport failure", body = ApiError)
    )
)]
async fn run_budget_reminders(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let day = EvaluationDay::containing(Utc::now(), state.tz);
    match reminders::run_budget_pass(&state.store, state.mailer.as_ref(), &day).await {
        Ok(summary) => {
            tracing::info!(
                trace_id = %trace_id,
                evaluated = summary.evaluated,
                sent = summary.sent,
                "manual budget pass finished"
            );
            success_response(StatusCode::OK, &trace_id, summary)
        }
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "manual budget pass failed");
            pass_error_response(&trace_id, &e)
        }
    }
}

/// Run the goal-reminder pass now.
#[utoipa::path(
    post,
    path = "/v1/admin/reminders/goals/run",
    tag = "Reminders",
    responses(
        (status = 200, description = "Pass summary with the sent count", body = PassSummary),
        (status = 500, description = "Pass aborted by a storage failure", body = ApiError),
        (status = 502, description = "Pass aborted by a mail transport failure", body = ApiError)
    )
)]
async fn run_goal_reminders(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let day = EvaluationDay::containing(Utc::now(), state.tz);
    match reminders::run_goal_pass(&state.store, state.mailer.as_ref(), &day).await {
        Ok(summary) => {
            tracing::info!(
                trace_id = %trace_id,
                evaluated = summary.evaluated,
                sent = summary.sent,
                "manual goal pass finished"
            );
            success_response(StatusCode::OK, &trace_id, summary)
        }
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "manual goal pass failed");
            pass_error_response(&trace_id, &e)
        }
    }
}

pub fn reminder_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(run_budget_reminders))
        .routes(routes!(run_goal_reminders))
}
