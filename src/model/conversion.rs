use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub converted_amount: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Problem {
    Missing,
    NotAString,
    NotANumber,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: Problem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            Problem::Missing => write!(f, "`{}` is missing", self.field),
            Problem::NotAString => write!(f, "`{}` must be a string", self.field),
            Problem::NotANumber => write!(f, "`{}` must be a number", self.field),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("invalid request body: {}", join(.0))]
    Fields(Vec<FieldError>),
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|it| it.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConversionRequest {
    /// Checks every field of a decoded body and reports all problems at once.
    pub fn from_json(body: &Value) -> Result<ConversionRequest, ValidationError> {
        let body = body.as_object().ok_or(ValidationError::NotAnObject)?;
        let mut errors = Vec::new();

        let from = string_field(body, "from", &mut errors);
        let to = string_field(body, "to", &mut errors);
        let amount = match body.get("amount") {
            None | Some(Value::Null) => {
                errors.push(FieldError {
                    field: "amount",
                    problem: Problem::Missing,
                });
                None
            }
            Some(v) => {
                let amount = v.as_f64();
                if amount.is_none() {
                    errors.push(FieldError {
                        field: "amount",
                        problem: Problem::NotANumber,
                    });
                }
                amount
            }
        };

        match (from, to, amount) {
            (Some(from), Some(to), Some(amount)) => Ok(ConversionRequest { from, to, amount }),
            _ => Err(ValidationError::Fields(errors)),
        }
    }
}

fn string_field(
    body: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError {
                field,
                problem: Problem::Missing,
            });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError {
                field,
                problem: Problem::NotAString,
            });
            None
        }
    }
}
