//! Actix handlers serving the GraphQL endpoint and the banner.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use juniper::http::GraphQLRequest;
use tracing::error;

use crate::domain::SessionToken;
use crate::inbound::graphql::{
    GraphQLContext, GraphQLPorts, Schema, encode_entity_representations, mask_error_messages,
};

/// Largest accepted request body.
pub const JSON_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Plain-text banner served at `/`.
pub const BANNER: &str = "Transaction's subgraph is running";

/// Extract a bearer token from the `Authorization` header.
///
/// Anything other than `Bearer <token>` counts as no token at all.
pub fn bearer_token(req: &HttpRequest) -> Option<SessionToken> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    SessionToken::new(token).ok()
}

/// Execute one GraphQL document.
///
/// Parse and validation failures return 400; everything else returns 200
/// with field errors in the body.
#[post("/graphql")]
pub async fn graphql(
    req: HttpRequest,
    body: web::Json<GraphQLRequest>,
    schema: web::Data<Schema>,
    ports: web::Data<GraphQLPorts>,
) -> HttpResponse {
    let context = GraphQLContext::new(ports.get_ref().clone(), bearer_token(&req));
    let mut request = body.into_inner();
    encode_entity_representations(&mut request);
    let response = request.execute(schema.get_ref(), &context).await;
    let mut builder = if response.is_ok() {
        HttpResponse::Ok()
    } else {
        HttpResponse::BadRequest()
    };

    match serde_json::to_value(&response) {
        Ok(mut payload) => {
            mask_error_messages(&mut payload);
            builder.json(payload)
        }
        Err(err) => {
            error!(error = %err, "failed to serialise graphql response");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Banner confirming the process is up.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(BANNER)
}

/// JSON extractor settings for the GraphQL endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().limit(JSON_BODY_LIMIT)
}
