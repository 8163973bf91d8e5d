//! Flexible argument shapes accepted by upsert and the deprecated multi-query
//!
//! Callers may pass structured records, positional tuples, or loose JSON (as
//! read from a file). Each shape is normalized into the strict wire record;
//! a JSON value that fits no shape is an [`IndexError::InvalidArgument`].

use serde_json::Value;

use crate::error::{IndexError, Result};
use crate::models::{Filter, Metadata, QueryVector, Vector};

/// One vector handed to upsert
#[derive(Debug, Clone, PartialEq)]
pub enum VectorInput {
    /// Already canonical
    Structured(Vector),
    /// `(id, values, metadata)`; metadata defaults to an empty object
    Tuple(String, Vec<f32>, Option<Metadata>),
    /// An object with `id`/`values`/`metadata`, or an array of 2 or 3 positions
    Json(Value),
}

impl VectorInput {
    /// Normalize into a canonical [`Vector`]
    pub fn into_vector(self) -> Result<Vector> {
        let vector = match self {
            VectorInput::Structured(vector) => vector,
            VectorInput::Tuple(id, values, metadata) => Vector {
                id,
                values,
                metadata: Some(metadata.unwrap_or_default()),
            },
            VectorInput::Json(Value::Object(map)) => vector_from_object(map)?,
            VectorInput::Json(Value::Array(items)) => vector_from_positions(items)?,
            VectorInput::Json(other) => {
                return Err(IndexError::invalid_argument(format!(
                    "Invalid vector value passed: cannot interpret type {}",
                    json_type(&other)
                )))
            }
        };
        ensure_finite(&vector.values)?;
        Ok(vector)
    }
}

/// `values` is required here just as it is for the positional form
fn vector_from_object(map: serde_json::Map<String, Value>) -> Result<Vector> {
    if !map.contains_key("values") {
        return Err(IndexError::invalid_argument(
            "Invalid vector value passed: object has no values",
        ));
    }
    serde_json::from_value(Value::Object(map)).map_err(|e| {
        IndexError::invalid_argument(format!(
            "Invalid vector value passed: cannot interpret object ({})",
            e
        ))
    })
}

/// Pad to (id, values, metadata); positions past the third are dropped
fn vector_from_positions(items: Vec<Value>) -> Result<Vector> {
    let mut positions = items.into_iter();
    let (id, values, metadata) = match (positions.next(), positions.next(), positions.next()) {
        (Some(id), Some(values), metadata) => (id, values, metadata),
        _ => {
            return Err(IndexError::invalid_argument(
                "Invalid vector value passed: a tuple needs at least (id, values)",
            ))
        }
    };

    let id = match id {
        Value::String(id) => id,
        other => {
            return Err(IndexError::invalid_argument(format!(
                "Invalid vector id: expected string, got {}",
                json_type(&other)
            )))
        }
    };
    let values = parse_values(values)?;
    let metadata = match metadata {
        None | Some(Value::Null) => Metadata::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(IndexError::invalid_argument(format!(
                "Invalid vector metadata: expected object, got {}",
                json_type(&other)
            )))
        }
    };

    Ok(Vector {
        id,
        values,
        metadata: Some(metadata),
    })
}

impl From<Vector> for VectorInput {
    fn from(vector: Vector) -> Self {
        VectorInput::Structured(vector)
    }
}

impl<S: Into<String>> From<(S, Vec<f32>)> for VectorInput {
    fn from((id, values): (S, Vec<f32>)) -> Self {
        VectorInput::Tuple(id.into(), values, None)
    }
}

impl<S: Into<String>> From<(S, Vec<f32>, Metadata)> for VectorInput {
    fn from((id, values, metadata): (S, Vec<f32>, Metadata)) -> Self {
        VectorInput::Tuple(id.into(), values, Some(metadata))
    }
}

impl<S: Into<String>> From<(S, Vec<f32>, Option<Metadata>)> for VectorInput {
    fn from((id, values, metadata): (S, Vec<f32>, Option<Metadata>)) -> Self {
        VectorInput::Tuple(id.into(), values, metadata)
    }
}

impl From<Value> for VectorInput {
    fn from(value: Value) -> Self {
        VectorInput::Json(value)
    }
}

/// One entry of the deprecated multi-query list
#[derive(Debug, Clone, PartialEq)]
pub enum QueryVectorInput {
    /// Already canonical
    Structured(QueryVector),
    /// `(values, filter)`
    Tuple(Vec<f32>, Option<Filter>),
    /// Bare values with no filter
    Values(Vec<f32>),
    /// A number array, a `[values, filter]` array, or a QueryVector object
    Json(Value),
}

impl QueryVectorInput {
    /// Normalize into a canonical [`QueryVector`]
    pub fn into_query_vector(self) -> Result<QueryVector> {
        let query = match self {
            QueryVectorInput::Structured(query) => query,
            QueryVectorInput::Tuple(values, filter) => QueryVector {
                filter,
                ..QueryVector::new(values)
            },
            QueryVectorInput::Values(values) => QueryVector::new(values),
            QueryVectorInput::Json(Value::Object(map)) => {
                serde_json::from_value(Value::Object(map)).map_err(|e| {
                    IndexError::invalid_argument(format!(
                        "Invalid query vector value passed: cannot interpret object ({})",
                        e
                    ))
                })?
            }
            QueryVectorInput::Json(Value::Array(items)) => query_from_array(items)?,
            QueryVectorInput::Json(other) => {
                return Err(IndexError::invalid_argument(format!(
                    "Invalid query vector value passed: cannot interpret type {}",
                    json_type(&other)
                )))
            }
        };
        ensure_finite(&query.values)?;
        Ok(query)
    }
}

fn query_from_array(items: Vec<Value>) -> Result<QueryVector> {
    let looks_like_tuple = matches!(items.first(), Some(Value::Array(_)));
    if !looks_like_tuple {
        return Ok(QueryVector::new(parse_values(Value::Array(items))?));
    }

    let mut positions = items.into_iter();
    let values = parse_values(positions.next().unwrap_or(Value::Null))?;
    let filter = match positions.next() {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            return Err(IndexError::invalid_argument(format!(
                "Invalid query filter: expected object, got {}",
                json_type(&other)
            )))
        }
    };

    Ok(QueryVector {
        filter,
        ..QueryVector::new(values)
    })
}

impl From<QueryVector> for QueryVectorInput {
    fn from(query: QueryVector) -> Self {
        QueryVectorInput::Structured(query)
    }
}

impl From<(Vec<f32>, Filter)> for QueryVectorInput {
    fn from((values, filter): (Vec<f32>, Filter)) -> Self {
        QueryVectorInput::Tuple(values, Some(filter))
    }
}

impl From<(Vec<f32>, Option<Filter>)> for QueryVectorInput {
    fn from((values, filter): (Vec<f32>, Option<Filter>)) -> Self {
        QueryVectorInput::Tuple(values, filter)
    }
}

impl From<Vec<f32>> for QueryVectorInput {
    fn from(values: Vec<f32>) -> Self {
        QueryVectorInput::Values(values)
    }
}

impl From<&[f32]> for QueryVectorInput {
    fn from(values: &[f32]) -> Self {
        QueryVectorInput::Values(values.to_vec())
    }
}

impl From<Value> for QueryVectorInput {
    fn from(value: Value) -> Self {
        QueryVectorInput::Json(value)
    }
}

/// A JSON array of numbers
fn parse_values(value: Value) -> Result<Vec<f32>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(IndexError::invalid_argument(format!(
                "Invalid vector values: expected array of numbers, got {}",
                json_type(&other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let value = item.as_f64().map(|v| v as f32).ok_or_else(|| {
                IndexError::invalid_argument(format!(
                    "Invalid vector values: element {} is {}, not a number",
                    i,
                    json_type(item)
                ))
            })?;
            if !value.is_finite() {
                return Err(IndexError::invalid_argument(format!(
                    "Invalid vector values: element {} is out of f32 range",
                    i
                )));
            }
            Ok(value)
        })
        .collect()
}

/// Non-finite values would serialize as `null`
fn ensure_finite(values: &[f32]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(IndexError::invalid_argument(format!(
            "Invalid vector values: element {} is not finite",
            i
        ))),
        None => Ok(()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
