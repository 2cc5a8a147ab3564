use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use rbc_service::{
	CatalogCounts, EmailDraft, EmailReceipt, EmailRequest, Error as ServiceError, PoliciesRequest,
	PoliciesResponse, PolicySummary, QueryPairs, ReportsRequest, ReportsResponse,
};

use crate::state::AppState;

type PairsQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::Storage(err) => json_error(
				StatusCode::INTERNAL_SERVER_ERROR,
				"STORAGE_ERROR",
				err.to_string(),
				None,
			),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/reports", get(reports))
		.route("/api/reports/email", post(send_email))
		.route("/api/reports/email/draft", get(email_draft))
		.route("/api/policies", get(policies))
		.route("/api/policies/summary", get(policy_summary))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/reload", post(reload)).with_state(state)
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn reports(State(state): State<AppState>, query: PairsQuery) -> Json<ReportsResponse> {
	let service = state.service().await;
	let req = ReportsRequest::from(&query_pairs(query));

	Json(service.query_reports(&req))
}

async fn email_draft(
	State(state): State<AppState>,
	query: PairsQuery,
) -> Result<Json<EmailDraft>, ApiError> {
	let query = query_pairs(query);
	let Some(title) = query.first("title").map(str::trim).filter(|title| !title.is_empty()) else {
		return Err(json_error(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			"title is required.",
			Some(vec!["title".to_string()]),
		));
	};
	let service = state.service().await;
	let draft = service.email_draft(title)?;

	Ok(Json(draft))
}

async fn send_email(
	State(state): State<AppState>,
	Json(payload): Json<EmailRequest>,
) -> Result<Json<EmailReceipt>, ApiError> {
	let service = state.service().await;
	let receipt = service.send_email(&payload)?;

	Ok(Json(receipt))
}

async fn policies(State(state): State<AppState>, query: PairsQuery) -> Json<PoliciesResponse> {
	let service = state.service().await;
	let req = PoliciesRequest::from(&query_pairs(query));

	Json(service.query_policies(&req))
}

async fn policy_summary(State(state): State<AppState>) -> Json<PolicySummary> {
	let service = state.service().await;

	Json(service.policy_summary())
}

async fn reload(State(state): State<AppState>) -> Result<Json<CatalogCounts>, ApiError> {
	let service = state.reload().await.map_err(|err| {
		tracing::error!(error = %err, "Catalog reload failed; keeping the current snapshot.");

		json_error(StatusCode::INTERNAL_SERVER_ERROR, "RELOAD_FAILED", err.to_string(), None)
	})?;

	Ok(Json(service.counts()))
}

/// Query parameters are never a reason to reject a request: an unreadable query string reads as
/// an empty one.
fn query_pairs(query: PairsQuery) -> QueryPairs {
	match query {
		Ok(Query(pairs)) => QueryPairs::new(pairs),
		Err(rejection) => {
			tracing::debug!(error = %rejection, "Ignoring unreadable query string.");

			QueryPairs::default()
		},
	}
}
