//! Feeds a couple of mock HTTP requests through an observable and reports the
//! status each handler would answer with.
//!
//! Run with `cargo run --features demo --bin requests`. Log verbosity follows
//! `RUST_LOG` (default `info`); use `RUST_LOG=trace` to see the subscription
//! lifecycle.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rxlite::{Observable, ObserverHandlers, Subscribeable, Unsubscribeable};
use tracing::{error, info};

const HTTP_STATUS_OK: u16 = 200;
const HTTP_STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct User {
    name: String,
    age: u32,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    is_deleted: bool,
}

#[derive(Debug, Clone)]
struct Request {
    method: Method,
    host: String,
    path: String,
    body: Option<User>,
    params: HashMap<String, String>,
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.method, self.host, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Status(u16);

fn mock_requests() -> Vec<Request> {
    let user = User {
        name: "User Name".to_owned(),
        age: 26,
        roles: vec!["user".to_owned(), "admin".to_owned()],
        created_at: Utc::now(),
        is_deleted: false,
    };

    vec![
        Request {
            method: Method::Post,
            host: "service.example".to_owned(),
            path: "user".to_owned(),
            body: Some(user),
            params: HashMap::new(),
        },
        Request {
            method: Method::Get,
            host: "service.example".to_owned(),
            path: "user".to_owned(),
            body: None,
            params: HashMap::from([("id".to_owned(), "3f5h67s4s".to_owned())]),
        },
    ]
}

fn handle_request(request: &Request) -> Status {
    info!(
        %request,
        has_body = request.body.is_some(),
        params = ?request.params,
        "handling request"
    );
    Status(HTTP_STATUS_OK)
}

fn handle_error(request: &Request) -> Status {
    error!(%request, "request failed");
    Status(HTTP_STATUS_INTERNAL_SERVER_ERROR)
}

fn main() -> Result<(), rxlite::ObservableError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let requests = Observable::<Request, Request>::from(mock_requests());

    let subscription = requests.subscribe(
        ObserverHandlers::new()
            .on_next(|request| {
                let Status(code) = handle_request(&request);
                info!(status = code, "request handled");
            })
            .on_error(|request| {
                let Status(code) = handle_error(&request);
                info!(status = code, "error handled");
            })
            .on_complete(|| info!("complete")),
    )?;

    subscription.unsubscribe();
    Ok(())
}
