use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use rbc_api::{routes, state::AppState};
use rbc_testkit::FixtureDir;

fn write_fixtures(dir: &FixtureDir) {
	dir.write_reports(&rbc_testkit::bsp_reports()).expect("Failed to write reports.");
	dir.write_policies(&serde_json::json!([
		{
			"id": "RB-1",
			"title": "RB-AML-001",
			"subject": "Money Laundering Prevention Program",
			"category": "AML/CFT",
			"status": "Fully Compliant",
			"compliance_Gap": "None",
			"priority": "High",
			"bspReference": "BSP Circular No. 950",
			"bspIssuance": "C950"
		},
		{
			"id": "RB-2",
			"title": "RB-GOV-004",
			"category": "Governance",
			"status": "Slightly Compliant",
			"priority": "Medium",
			"bspReference": "BSP Circular No. 1129"
		},
		{
			"title": "RB-IT-002",
			"category": "Operations",
			"status": "Under review",
			"bspReference": "BSP Circular No. 982"
		}
	]))
	.expect("Failed to write policies.");
}

async fn app_state(dir: &FixtureDir) -> AppState {
	write_fixtures(dir);

	AppState::new(dir.config()).await.expect("Failed to initialize app state.")
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let builder = Request::builder().method(method).uri(uri);
	let request = match body {
		Some(json) => builder
			.header("content-type", "application/json")
			.body(Body::from(json.to_string()))
			.expect("Failed to build request."),
		None => builder.body(Body::empty()).expect("Failed to build request."),
	};
	let response = app.oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Response body is not JSON.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let dir = FixtureDir::new("rbc_api_health").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, _) = call(routes::router(state), "GET", "/health", None).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reports_endpoint_filters_and_paginates() {
	let dir = FixtureDir::new("rbc_api_reports").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) = call(
		routes::router(state),
		"GET",
		"/api/reports?category=Prudential&page=1&limit=2",
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
	assert_eq!(json["data"][0]["Report Title"], "Financial Reporting Package");
	assert_eq!(json["pagination"]["total"], 3);
	assert_eq!(json["pagination"]["totalPages"], 2);
	assert_eq!(json["filters"]["categories"][0], "Prudential");
}

#[tokio::test]
async fn malformed_paging_is_coerced_not_rejected() {
	let dir = FixtureDir::new("rbc_api_paging").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) =
		call(routes::router(state), "GET", "/api/reports?page=abc&limit=0", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["pagination"]["page"], 1);
	assert_eq!(json["pagination"]["limit"], 20);
	assert_eq!(json["pagination"]["total"], 6);
}

#[tokio::test]
async fn oversized_limit_is_clamped() {
	let dir = FixtureDir::new("rbc_api_clamp").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) = call(routes::router(state), "GET", "/api/reports?limit=1000", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["pagination"]["limit"], 100);
	assert_eq!(json["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn repeated_parameters_take_their_first_value() {
	let dir = FixtureDir::new("rbc_api_repeated").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) = call(
		routes::router(state.clone()),
		"GET",
		"/api/reports?page=1&page=2&limit=2&category=AML&category=Prudential",
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["pagination"]["page"], 1);
	assert_eq!(json["pagination"]["total"], 1);
	assert_eq!(json["data"][0]["Report Title"], "Covered Transaction Report");

	let (status, json) = call(
		routes::router(state),
		"GET",
		"/api/policies?sort=status&sort=title&direction=desc&direction=asc",
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["sort"]["key"], "status");
	assert_eq!(json["sort"]["direction"], "desc");
}

#[tokio::test]
async fn fractional_paging_values_keep_their_integer_part() {
	let dir = FixtureDir::new("rbc_api_fractional").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) =
		call(routes::router(state), "GET", "/api/reports?page=2.5&limit=3abc", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["pagination"]["page"], 2);
	assert_eq!(json["pagination"]["limit"], 3);
	assert_eq!(json["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn policies_endpoint_sorts_and_normalizes() {
	let dir = FixtureDir::new("rbc_api_policies").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) = call(
		routes::router(state),
		"GET",
		"/api/policies?sort=status&direction=desc&status=all",
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 3);
	assert_eq!(json["data"][0]["title"], "RB-IT-002");
	assert_eq!(json["data"][0]["status"], "Non-Existent");
	assert_eq!(json["data"][0]["statusLabel"], "NA - Information Only");
	assert_eq!(json["data"][2]["documentPath"], "/pdfs/C950.pdf");
	assert_eq!(json["sort"]["key"], "status");
	assert_eq!(json["sort"]["direction"], "desc");
	assert_eq!(
		json["filters"]["categories"],
		serde_json::json!(["AML/CFT", "Governance", "Operations"])
	);
}

#[tokio::test]
async fn policy_summary_counts_statuses() {
	let dir = FixtureDir::new("rbc_api_summary").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) = call(routes::router(state), "GET", "/api/policies/summary", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 3);
	assert_eq!(json["vocabulary"], "revised");
	assert_eq!(json["statuses"][2]["status"], "Non-Existent");
	assert_eq!(json["statuses"][2]["count"], 1);
}

#[tokio::test]
async fn email_flow_is_a_stub() {
	let dir = FixtureDir::new("rbc_api_email").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, draft) = call(
		routes::router(state.clone()),
		"GET",
		"/api/reports/email/draft?title=Capital%20Adequacy%20Ratio%20Report",
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(draft["to"], "dsa@bsp.gov.ph");

	let (status, receipt) = call(
		routes::router(state.clone()),
		"POST",
		"/api/reports/email",
		Some(serde_json::json!({
			"report_title": "Capital Adequacy Ratio Report",
			"message": "Submitted via portal."
		})),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(receipt["sent"], true);
	assert_eq!(receipt["delivered"], false);

	let (status, error) = call(
		routes::router(state),
		"POST",
		"/api/reports/email",
		Some(serde_json::json!({ "to": "nobody" })),
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(error["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn draft_without_title_is_a_structured_error() {
	let dir = FixtureDir::new("rbc_api_draft_title").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) =
		call(routes::router(state), "GET", "/api/reports/email/draft", None).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
	assert_eq!(json["fields"][0], "title");
}

#[tokio::test]
async fn unknown_report_draft_is_not_found() {
	let dir = FixtureDir::new("rbc_api_draft").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;
	let (status, json) =
		call(routes::router(state), "GET", "/api/reports/email/draft?title=Nope", None).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn reload_picks_up_new_fixtures_and_keeps_snapshot_on_failure() {
	let dir = FixtureDir::new("rbc_api_reload").expect("Failed to create fixture dir.");
	let state = app_state(&dir).await;

	dir.write_reports(&rbc_testkit::sample_reports(9, &["A"]))
		.expect("Failed to rewrite reports.");

	let (status, counts) =
		call(routes::admin_router(state.clone()), "POST", "/v1/admin/reload", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(counts["reports"], 9);
	assert_eq!(counts["policies"], 3);

	dir.write("req_reports_list.csv", "").expect("Failed to truncate reports.");

	let (status, error) =
		call(routes::admin_router(state.clone()), "POST", "/v1/admin/reload", None).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(error["error_code"], "RELOAD_FAILED");
	assert_eq!(state.service().await.counts().reports, 9);
}
