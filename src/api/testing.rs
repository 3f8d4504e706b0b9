//
//  github-explorer
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::client::GraphQlTransport;
use super::common::TransportFailure;

/// Replays canned responses in order and records the variables of every
/// request it receives.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, TransportFailure>>>,
    requests: Mutex<Vec<Value>>,
    documents: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_results(responses: Vec<Result<Value, TransportFailure>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            documents: Mutex::new(Vec::new()),
        }
    }

    /// Variables sent with each request, in order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Query documents sent with each request, in order.
    pub fn documents(&self) -> Vec<String> {
        self.documents.lock().unwrap().clone()
    }

    /// Responses not consumed yet.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphQlTransport for ScriptedTransport {
    async fn execute(&self, query: &str, variables: &Value) -> Result<Value, TransportFailure> {
        self.requests.lock().unwrap().push(variables.clone());
        self.documents.lock().unwrap().push(query.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::request("scripted transport exhausted")))
    }
}

/// Builds one response page with the connection at `path`.
///
/// `list` is `"nodes"` or `"edges"`; `next` is the end cursor, and its
/// presence sets `hasNextPage`.
pub fn page(path: &[&str], list: &str, items: Vec<Value>, next: Option<&str>) -> Value {
    let mut connection = json!({
        "pageInfo": {
            "endCursor": next,
            "hasNextPage": next.is_some(),
        }
    });
    connection[list] = Value::Array(items);

    let mut value = connection;
    for key in path.iter().rev() {
        let mut object = Map::new();
        object.insert(key.to_string(), value);
        value = Value::Object(object);
    }
    json!({ "data": value })
}
