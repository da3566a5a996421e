//! Scripted climate API for integration tests

#![allow(dead_code)]

use climate_dashboard::error::{AppError, AppResult};
use climate_dashboard::external::climate_api::{ClimateApi, Query};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Delayed(Duration, Value),
    Fail(String),
}

struct Route {
    path: &'static str,
    city: Option<String>,
    reply: Reply,
}

/// Replies by path, optionally narrowed to a `city` query value.
/// Later stubs win over earlier ones.
#[derive(Default)]
pub struct FakeClimateApi {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<(String, Query)>>,
}

impl FakeClimateApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &'static str, reply: Reply) -> Self {
        self.stub(path, None, reply);
        self
    }

    pub fn with_city(self, path: &'static str, city: &str, reply: Reply) -> Self {
        self.stub(path, Some(city), reply);
        self
    }

    pub fn stub(&self, path: &'static str, city: Option<&str>, reply: Reply) {
        self.routes.lock().unwrap().push(Route {
            path,
            city: city.map(str::to_string),
            reply,
        });
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(p, _)| p == path).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_query(&self, path: &str) -> Option<Query> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
    }

    fn find(&self, path: &str, query: &Query) -> Option<Reply> {
        let city = query.iter().find(|(k, _)| *k == "city").map(|(_, v)| v.as_str());
        self.routes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.path == path && (r.city.is_none() || r.city.as_deref() == city))
            .map(|r| r.reply.clone())
    }
}

impl ClimateApi for FakeClimateApi {
    async fn get(&self, path: &'static str, query: Query) -> AppResult<Value> {
        let reply = self.find(path, &query);
        self.calls.lock().unwrap().push((path.to_string(), query));
        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Some(Reply::Fail(message)) => Err(AppError::ExternalService(message)),
            None => Err(AppError::ExternalService(format!("{} not stubbed", path))),
        }
    }
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn weather(temperature: f64, humidity: f64) -> Value {
    ok(json!({
        "temperature": temperature,
        "feels_like": temperature - 1.0,
        "humidity": humidity,
        "pressure": 1013,
        "wind_speed": 3.5,
        "conditions": "Clear",
        "description": "clear sky"
    }))
}

pub fn forecast() -> Value {
    ok(json!({
        "forecast": [
            { "date": "2026-10-20", "temp_max": 21.0, "temp_min": 12.0 },
            { "date": "2026-10-21", "temp_max": 19.0, "temp_min": 11.0 }
        ]
    }))
}
