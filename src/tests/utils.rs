use crate::catalog::{BuildOptions, CatalogCache};
use crate::query::PropertyService;
use crate::rentvine::{Fetched, GatewayError, PropertyGateway, PropertyRecord, UnitRecord};
use crate::router::AppState;
use astra::{Body, Request, Response};
use http::Method;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

/// In-memory backend with a call counter on the properties endpoint.
#[derive(Default)]
pub struct FakeGateway {
    pub properties: Vec<PropertyRecord>,
    pub units: HashMap<i64, Vec<UnitRecord>>,
    pub property_calls: AtomicUsize,
}

impl PropertyGateway for FakeGateway {
    fn fetch_properties(&self) -> Result<Fetched<PropertyRecord>, GatewayError> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.properties.clone().into())
    }

    fn fetch_units(&self, property_id: i64) -> Result<Fetched<UnitRecord>, GatewayError> {
        Ok(self.units.get(&property_id).cloned().unwrap_or_default().into())
    }
}

pub fn app_state(gateway: Arc<FakeGateway>) -> AppState {
    let cache = CatalogCache::new(gateway, BuildOptions::default());
    AppState {
        service: PropertyService::new(Arc::new(cache)),
    }
}

pub fn request(method: Method, uri: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_json(mut resp: Response) -> serde_json::Value {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A throwaway HTTP/1.1 responder on 127.0.0.1 that answers each path with a
/// fixed status and body and records every request head it sees.
pub struct CannedServer {
    pub base_url: Url,
    pub requests: Arc<Mutex<Vec<String>>>,
}

pub fn serve_canned(routes: Vec<(&str, u16, &str)>) -> CannedServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let routes: HashMap<String, (u16, String)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
        .collect();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let head = String::from_utf8_lossy(&head).to_string();
            let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
            seen.lock().unwrap().push(head);

            let (status, body) = routes
                .get(&path)
                .cloned()
                .unwrap_or((404, "not found".to_string()));
            let reply = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(reply.as_bytes());
        }
    });

    CannedServer {
        base_url: Url::parse(&format!("http://127.0.0.1:{port}/api/manager/")).unwrap(),
        requests,
    }
}
