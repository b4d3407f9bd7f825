//! JSON view of a typed tree, for logging and debugging.

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value as Json};
use shipbind_model::{ContentModel, MixedItem, Scalar, TypedNode, Value};

use crate::codec;

/// Converts a node to JSON.
///
/// Fields are keyed by name in declaration order. Fields that may repeat
/// become arrays. Simple content is stored under `$value`, mixed content
/// under `$mixed` and a type hint under `$type`.
#[must_use]
pub fn to_json(node: &TypedNode) -> Json {
    let mut object = Map::new();
    if let Some(hint) = node.type_hint() {
        object.insert("$type".to_owned(), Json::String(hint.to_owned()));
    }
    for (descriptor, values) in node.populated_fields() {
        let json = if descriptor.is_repeated() || values.len() > 1 {
            Json::Array(values.iter().map(value_json).collect())
        } else {
            values.first().map_or(Json::Null, value_json)
        };
        object.insert(descriptor.name.to_owned(), json);
    }
    match node.schema().content {
        ContentModel::Simple(_) => {
            if let Some(text) = node.text() {
                object.insert("$value".to_owned(), scalar_json(text));
            }
        }
        ContentModel::Mixed => {
            let items = node
                .mixed()
                .iter()
                .filter(|item| !item.is_blank())
                .map(mixed_json)
                .collect();
            object.insert("$mixed".to_owned(), Json::Array(items));
        }
        ContentModel::Elements => {}
    }
    Json::Object(object)
}

fn value_json(value: &Value) -> Json {
    match value {
        Value::Scalar(scalar) => scalar_json(scalar),
        Value::Node(node) => to_json(node),
        Value::Any(markup) => Json::String(markup.clone()),
    }
}

fn mixed_json(item: &MixedItem) -> Json {
    match item {
        MixedItem::Text(text) => Json::String(text.clone()),
        MixedItem::Simple { name, value } => single(name, scalar_json(value)),
        MixedItem::Complex { name, node } => single(name, to_json(node)),
        MixedItem::Any { name, markup } => single(name, Json::String(markup.clone())),
    }
}

fn single(name: &str, value: Json) -> Json {
    let mut object = Map::new();
    object.insert(name.to_owned(), value);
    Json::Object(object)
}

fn scalar_json(scalar: &Scalar) -> Json {
    match scalar {
        Scalar::Integer(i) => Json::Number((*i).into()),
        Scalar::Float(f) | Scalar::Double(f) => Number::from_f64(*f)
            .map_or_else(|| Json::String(codec::format_scalar(scalar)), Json::Number),
        Scalar::Decimal(d) => d
            .to_f64()
            .filter(|f| codec::format_double(*f) == codec::format_decimal(*d))
            .and_then(Number::from_f64)
            .map_or_else(|| Json::String(codec::format_decimal(*d)), Json::Number),
        Scalar::Boolean(b) => Json::Bool(*b),
        Scalar::List(items) => Json::Array(items.iter().map(scalar_json).collect()),
        other => Json::String(codec::format_scalar(other)),
    }
}
