//! End-to-end tests for `/graphql` over in-memory repositories.
//!
//! Requests pass through the real middleware, handler, schema and domain
//! services. Only the driven ports are replaced.

#[path = "graphql_endpoint/in_memory.rs"]
mod in_memory;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use transactions_subgraph::domain::{ExchangeStatus, TransactionKind};
use transactions_subgraph::inbound::graphql::{GENERIC_ERROR_MESSAGE, schema};
use transactions_subgraph::inbound::http::graphql::{BANNER, JSON_BODY_LIMIT, graphql, index};
use transactions_subgraph::inbound::http::health::{HealthState, live, ready};
use transactions_subgraph::inbound::http::json_config;
use transactions_subgraph::middleware::TRACE_ID_HEADER;
use transactions_subgraph::Trace;

use in_memory::Market;

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";
const CAROL: &str = "carol-token";

/// Alice owns product 1, Bob owns 2 and 3 (3 is not exchangeable), Carol
/// owns nothing.
#[fixture]
fn market() -> Market {
    let market = Market::default();
    market.add_session(ALICE, "alice", Duration::hours(1));
    market.add_session(BOB, "bob", Duration::hours(1));
    market.add_session(CAROL, "carol", Duration::hours(1));
    market.add_session("stale-token", "alice", -Duration::minutes(5));
    market.add_product(1, "alice", true);
    market.add_product(2, "bob", true);
    market.add_product(3, "bob", false);
    market
}

async fn init_app(
    market: &Market,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(health)
            .app_data(web::Data::new(schema()))
            .app_data(web::Data::new(market.ports()))
            .app_data(json_config())
            .wrap(Trace)
            .service(index)
            .service(graphql)
            .service(ready)
            .service(live),
    )
    .await
}

fn graphql_request(token: Option<&str>, query: &str, variables: Value) -> Request {
    let request = TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": query, "variables": variables }));
    match token {
        Some(token) => request
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
        None => request.to_request(),
    }
}

async fn execute<S, B>(app: &S, token: Option<&str>, query: &str, variables: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, graphql_request(token, query, variables)).await;
    assert_eq!(response.status(), StatusCode::OK);
    test::read_body_json(response).await
}

fn only_error(body: &Value) -> &Value {
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1, "unexpected errors: {body}");
    &errors[0]
}

const CREATE: &str = r#"
mutation Create($input: CreateExchangeInput!) {
  createExchange(input: $input) { id transactionId status notes completedAt }
}"#;

const UPDATE: &str = r#"
mutation Update($input: UpdateExchangeStatusInput!) {
  updateExchangeStatus(input: $input) { id status completedAt }
}"#;

const CANCEL: &str = r#"
mutation Cancel($id: ID!) { cancelExchange(exchangeId: $id) { id status } }"#;

async fn create_default<S, B>(app: &S) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = execute(
        app,
        Some(ALICE),
        CREATE,
        json!({ "input": { "offeredProductId": 1, "requestedProductId": 2, "notes": "swap?" } }),
    )
    .await;
    body["data"]["createExchange"].clone()
}

#[rstest]
#[actix_web::test]
async fn banner_is_served_at_root(market: Market) {
    let app = init_app(&market).await;
    let response = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(test::read_body(response).await, BANNER.as_bytes());
}

#[rstest]
#[actix_web::test]
async fn creating_an_exchange_records_a_fifty_point_transaction(market: Market) {
    let app = init_app(&market).await;
    let created = create_default(&app).await;

    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["notes"], "swap?");
    assert_eq!(created["completedAt"], Value::Null);

    let transactions = market.transactions();
    assert_eq!(transactions.len(), 1);
    let ledger = &transactions[0];
    assert_eq!(ledger.kind, TransactionKind::Exchange);
    assert_eq!(ledger.points_collected, 50);
    assert_eq!(ledger.user_id.as_ref(), "alice");
    assert_eq!(created["transactionId"], json!(ledger.id.get()));

    let body = execute(
        &app,
        Some(ALICE),
        "{ myTransactions { kind pointsCollected exchangeDetails { status } } }",
        Value::Null,
    )
    .await;
    assert_eq!(
        body["data"]["myTransactions"],
        json!([{ "kind": "EXCHANGE", "pointsCollected": 50, "exchangeDetails": { "status": "PENDING" } }])
    );
}

#[rstest]
#[case::offered_product_missing(json!({ "offeredProductId": 40, "requestedProductId": 2 }))]
#[case::offered_product_not_owned(json!({ "offeredProductId": 2, "requestedProductId": 1 }))]
#[case::requested_product_missing(json!({ "offeredProductId": 1, "requestedProductId": 41 }))]
#[case::requested_product_not_exchangeable(json!({ "offeredProductId": 1, "requestedProductId": 3 }))]
#[case::own_product_requested(json!({ "offeredProductId": 1, "requestedProductId": 1 }))]
#[actix_web::test]
async fn rejected_creation_writes_nothing(market: Market, #[case] input: Value) {
    let app = init_app(&market).await;
    let body = execute(&app, Some(ALICE), CREATE, json!({ "input": input })).await;

    assert_eq!(only_error(&body)["message"], GENERIC_ERROR_MESSAGE);
    assert!(market.transactions().is_empty());
    assert!(market.exchanges().is_empty());
}

#[rstest]
#[actix_web::test]
async fn storage_failure_during_creation_leaves_no_rows(market: Market) {
    let app = init_app(&market).await;
    market.fail_writes();
    let body = execute(
        &app,
        Some(ALICE),
        CREATE,
        json!({ "input": { "offeredProductId": 1, "requestedProductId": 2 } }),
    )
    .await;

    assert_eq!(body["data"], Value::Null);
    assert_eq!(only_error(&body)["message"], GENERIC_ERROR_MESSAGE);
    assert!(market.transactions().is_empty());
}

#[rstest]
#[case::missing_token(None)]
#[case::unknown_token(Some("nobody"))]
#[case::expired_token(Some("stale-token"))]
#[actix_web::test]
async fn mutations_need_a_live_session(market: Market, #[case] token: Option<&str>) {
    let app = init_app(&market).await;
    let body = execute(
        &app,
        token,
        CREATE,
        json!({ "input": { "offeredProductId": 1, "requestedProductId": 2 } }),
    )
    .await;

    assert_eq!(only_error(&body)["message"], GENERIC_ERROR_MESSAGE);
    assert!(market.exchanges().is_empty());
}

#[rstest]
#[case::owner_accepts(BOB, "ACCEPTED", Some(ExchangeStatus::Accepted))]
#[case::owner_declines(BOB, "DECLINED", Some(ExchangeStatus::Declined))]
#[case::initiator_cannot_accept(ALICE, "ACCEPTED", None)]
#[case::initiator_cannot_complete(ALICE, "COMPLETED", None)]
#[case::owner_cannot_cancel(BOB, "CANCELLED", None)]
#[case::stranger_cannot_decline(CAROL, "DECLINED", None)]
#[case::initiator_cancels(ALICE, "CANCELLED", Some(ExchangeStatus::Cancelled))]
#[actix_web::test]
async fn status_changes_follow_ownership(
    market: Market,
    #[case] token: &str,
    #[case] status: &str,
    #[case] expected: Option<ExchangeStatus>,
) {
    let app = init_app(&market).await;
    let created = create_default(&app).await;

    let body = execute(
        &app,
        Some(token),
        UPDATE,
        json!({ "input": { "exchangeId": created["id"], "status": status } }),
    )
    .await;

    let stored = market.exchanges()[0].status;
    match expected {
        Some(status) => {
            assert!(body.get("errors").is_none(), "unexpected errors: {body}");
            assert_eq!(stored, status);
        }
        None => {
            assert_eq!(only_error(&body)["message"], GENERIC_ERROR_MESSAGE);
            assert_eq!(stored, ExchangeStatus::Pending);
        }
    }
}

#[rstest]
#[actix_web::test]
async fn completing_stamps_the_completion_time(market: Market) {
    let app = init_app(&market).await;
    let created = create_default(&app).await;

    let body = execute(
        &app,
        Some(BOB),
        UPDATE,
        json!({ "input": { "exchangeId": created["id"], "status": "COMPLETED" } }),
    )
    .await;

    let updated = &body["data"]["updateExchangeStatus"];
    assert_eq!(updated["status"], "COMPLETED");
    assert!(updated["completedAt"].is_string());
    assert!(market.exchanges()[0].completed_at.is_some());
}

#[rstest]
#[actix_web::test]
async fn cancel_exchange_is_reserved_for_the_initiator(market: Market) {
    let app = init_app(&market).await;
    let created = create_default(&app).await;

    let denied = execute(&app, Some(BOB), CANCEL, json!({ "id": created["id"] })).await;
    assert_eq!(only_error(&denied)["message"], GENERIC_ERROR_MESSAGE);

    let body = execute(&app, Some(ALICE), CANCEL, json!({ "id": created["id"] })).await;
    assert_eq!(body["data"]["cancelExchange"]["status"], "CANCELLED");
}

#[rstest]
#[actix_web::test]
async fn gateway_entity_lookups_resolve_references(market: Market) {
    let app = init_app(&market).await;
    let body = execute(
        &app,
        None,
        "query($representations: [_Any!]!) { _entities(representations: $representations) { ... on Product { id } ... on User { id } } }",
        json!({ "representations": [
            { "__typename": "Product", "id": "2" },
            { "__typename": "User", "id": "bob" },
        ] }),
    )
    .await;

    assert_eq!(
        body,
        json!({ "data": { "_entities": [{ "id": "2" }, { "id": "bob" }] } })
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_exchange_is_an_error(market: Market) {
    let app = init_app(&market).await;
    let body = execute(&app, None, r#"{ exchange(id: "999") { id } }"#, Value::Null).await;

    assert_eq!(body["data"]["exchange"], Value::Null);
    assert_eq!(only_error(&body)["message"], GENERIC_ERROR_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn transactions_are_listed_newest_first(market: Market) {
    let at = |day| {
        Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    };
    market.add_transaction("alice", TransactionKind::Purchase, 10, at(1));
    market.add_transaction("alice", TransactionKind::Bonus, 5, at(3));
    market.add_transaction("bob", TransactionKind::Gift, 7, at(2));
    let app = init_app(&market).await;

    let body = execute(
        &app,
        None,
        r#"{ transactions(userId: "alice") { kind pointsCollected exchangeDetails { id } } }"#,
        Value::Null,
    )
    .await;

    assert_eq!(
        body["data"]["transactions"],
        json!([
            { "kind": "BONUS", "pointsCollected": 5, "exchangeDetails": null },
            { "kind": "PURCHASE", "pointsCollected": 10, "exchangeDetails": null },
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn both_parties_see_the_exchange(market: Market) {
    let app = init_app(&market).await;
    let created = create_default(&app).await;

    for token in [ALICE, BOB] {
        let body = execute(&app, Some(token), "{ myExchanges { id } }", Value::Null).await;
        assert_eq!(body["data"]["myExchanges"], json!([{ "id": created["id"] }]));
    }
    let body = execute(&app, Some(CAROL), "{ myExchanges { id } }", Value::Null).await;
    assert_eq!(body["data"]["myExchanges"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn error_extensions_carry_the_response_trace_id(market: Market) {
    let app = init_app(&market).await;
    let response = test::call_service(
        &app,
        graphql_request(None, r#"{ exchange(id: "999") { id } }"#, Value::Null),
    )
    .await;

    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(only_error(&body)["extensions"]["traceId"], json!(trace_id));
}

#[rstest]
#[actix_web::test]
async fn invalid_documents_are_rejected_with_the_generic_message(market: Market) {
    let app = init_app(&market).await;
    let response = test::call_service(
        &app,
        graphql_request(None, "{ noSuchField }", Value::Null),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(only_error(&body)["message"], GENERIC_ERROR_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn bodies_over_the_limit_are_refused(market: Market) {
    let app = init_app(&market).await;
    let padding = " ".repeat(JSON_BODY_LIMIT);
    let request = TestRequest::post()
        .uri("/graphql")
        .insert_header(header::ContentType::json())
        .set_payload(format!(r#"{{"query":"{{ myExchanges {{ id }} }}{padding}"}}"#))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[rstest]
#[actix_web::test]
async fn large_bodies_under_the_limit_are_accepted(market: Market) {
    let app = init_app(&market).await;
    let padding = " ".repeat(2 * 1024 * 1024);
    let body = execute(
        &app,
        None,
        &format!(r#"{{ transactions(userId: "alice") {{ id }} }}{padding}"#),
        Value::Null,
    )
    .await;

    assert_eq!(body["data"]["transactions"], json!([]));
}
