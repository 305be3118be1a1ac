//! Apollo Federation support.
//!
//! The gateway composes the supergraph from the SDL returned by
//! `_service { sdl }` and resolves `User` and `Product` references through
//! `_entities`. Both entities are key-only here, so a representation maps
//! straight onto a stub carrying its id.
//!
//! juniper only accepts scalar values for scalar types, while the gateway
//! sends each `_Any` as an object. [`encode_entity_representations`] turns
//! those objects into JSON strings before validation runs.

use juniper::http::GraphQLRequest;
use juniper::{
    GraphQLScalar, GraphQLUnion, InputValue, Object, ScalarValue, Value, graphql_object,
};
use serde_json::{Map, Value as JsonValue};

use crate::domain::{DomainResult, EntityRef, Error};

use super::GraphQLContext;
use super::types::{ProductEntity, UserEntity};

/// Subgraph SDL with federation directives.
pub const SUBGRAPH_SDL: &str = include_str!("subgraph.graphql");

const TYPENAME: &str = "__typename";

/// Payload of the `_service` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceDefinition;

#[graphql_object(name = "_Service", context = GraphQLContext)]
impl ServiceDefinition {
    fn sdl() -> &'static str {
        SUBGRAPH_SDL
    }
}

/// One `_Any` value: an entity type name plus its `id` key.
#[derive(Debug, Clone, PartialEq, Eq, GraphQLScalar)]
#[graphql(name = "_Any", parse_token(String))]
pub struct EntityRepresentation {
    typename: String,
    id: String,
}

impl EntityRepresentation {
    /// Build a representation from its parts.
    pub fn new(typename: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            id: id.into(),
        }
    }

    /// Map onto the stub this subgraph owns for the named type.
    pub fn resolve(self) -> DomainResult<FederatedEntity> {
        let entity = EntityRef::new(self.id);
        match self.typename.as_str() {
            "User" => Ok(FederatedEntity::User(entity.into())),
            "Product" => Ok(FederatedEntity::Product(entity.into())),
            other => Err(Error::bad_request(format!("unknown entity type `{other}`"))),
        }
    }

    fn to_output<S: ScalarValue>(&self) -> Value<S> {
        let mut fields = Object::with_capacity(2);
        fields.add_field(TYPENAME, Value::scalar(self.typename.clone()));
        fields.add_field("id", Value::scalar(self.id.clone()));
        Value::Object(fields)
    }

    fn from_input<S: ScalarValue>(input: &InputValue<S>) -> Result<Self, String> {
        let raw = input
            .as_string_value()
            .ok_or_else(|| format!("expected an entity representation, found: {input}"))?;
        let fields: Map<String, JsonValue> = serde_json::from_str(raw)
            .map_err(|err| format!("malformed entity representation: {err}"))?;
        let typename = fields
            .get(TYPENAME)
            .and_then(JsonValue::as_str)
            .ok_or("entity representation lacks `__typename`")?;
        let id = match fields.get("id") {
            Some(JsonValue::String(id)) => id.clone(),
            Some(JsonValue::Number(id)) => id.to_string(),
            _ => return Err("entity representation lacks an `id` key".to_owned()),
        };
        Ok(Self::new(typename, id))
    }
}

/// Members of the `_Entity` union.
#[derive(Debug, Clone, PartialEq, Eq, GraphQLUnion)]
#[graphql(name = "_Entity", context = GraphQLContext)]
pub enum FederatedEntity {
    /// A `User` reference.
    User(UserEntity),
    /// A `Product` reference.
    Product(ProductEntity),
}

/// Rewrite every object variable carrying `__typename` into its JSON text so
/// it can pass as an `_Any` scalar.
///
/// Names starting with `__` are reserved, so no input object field can clash.
pub fn encode_entity_representations(request: &mut GraphQLRequest) {
    if let Some(variables) = request.variables.as_mut() {
        encode_value(variables);
    }
}

fn is_representation(value: &InputValue) -> bool {
    matches!(value, InputValue::Object(fields) if fields.iter().any(|(key, _)| key.item == TYPENAME))
}

fn encode_value(value: &mut InputValue) {
    if is_representation(value) {
        if let Ok(text) = serde_json::to_string(&*value) {
            *value = InputValue::scalar(text);
        }
        return;
    }
    match value {
        InputValue::List(items) => {
            for item in items {
                encode_value(&mut item.item);
            }
        }
        InputValue::Object(fields) => {
            for (_, field) in fields {
                encode_value(&mut field.item);
            }
        }
        _ => {}
    }
}
