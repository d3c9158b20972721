//! Operation lookup and request handling

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value as JsonValue};
use tracing::debug;
use quanta_core::QuantaError;
use quanta_units::Registry;

use crate::operations::{self, Operation};
use crate::protocol::{Request, Response};

pub struct Dispatcher {
    operations: HashMap<String, Arc<dyn Operation>>,
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { operations: HashMap::new(), registry }
    }

    /// Built-in registry with every operation
    pub fn standard() -> Result<Self, QuantaError> {
        let registry = Registry::builtin()?;
        Ok(Self::new(registry)
            .with_operation(operations::Parse)
            .with_operation(operations::Convert)
            .with_operation(operations::Best)
            .with_operation(operations::Combine)
            .with_operation(operations::Subtract)
            .with_operation(operations::Compound)
            .with_operation(operations::Conversions)
            .with_operation(operations::FractionOp)
            .with_operation(operations::Classes))
    }

    pub fn with_operation<O: Operation + 'static>(mut self, op: O) -> Self {
        let name = op.meta().name.to_lowercase();
        self.operations.insert(name, Arc::new(op));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Operation>> {
        self.operations.get(&name.to_lowercase())
    }

    /// Operation names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn handle(&self, request: &Request) -> Response {
        debug!(op = %request.op, args = request.args.len(), "handling request");
        match self.call(request) {
            Ok(result) => Response::success(request.id.clone(), result),
            Err(err) => {
                debug!(op = %request.op, code = %err.code, "request failed");
                Response::failure(request.id.clone(), err)
            }
        }
    }

    fn call(&self, request: &Request) -> Result<JsonValue, QuantaError> {
        match request.op.to_lowercase().as_str() {
            "help" => self.help(request.args.first()),
            "list" => Ok(json!(self.names())),
            name => {
                let op = self.get(name).ok_or_else(|| QuantaError::unknown_operation(name))?;
                op.call(&request.args, &request.options, &self.registry)
            }
        }
    }

    fn help(&self, topic: Option<&JsonValue>) -> Result<JsonValue, QuantaError> {
        match topic.and_then(JsonValue::as_str) {
            Some(name) => {
                let op = self.get(name).ok_or_else(|| QuantaError::unknown_operation(name))?;
                serde_json::to_value(op.meta()).map_err(|e| QuantaError::internal(e.to_string()))
            }
            None => {
                let summary: Vec<JsonValue> = self
                    .names()
                    .into_iter()
                    .filter_map(|name| self.get(name))
                    .map(|op| {
                        let meta = op.meta();
                        json!({ "name": meta.name, "usage": meta.usage, "description": meta.description })
                    })
                    .collect();
                Ok(JsonValue::Array(summary))
            }
        }
    }
}
