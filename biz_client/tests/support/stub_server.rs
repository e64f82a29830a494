use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE};
use axum::response::IntoResponse;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// 服务端收到的一次请求
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// 预设响应：按方法与路径前缀匹配
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: &'static str,
}

pub fn route(method: &'static str, path: &'static str, status: u16, body: &'static str) -> Route {
    Route { method, path, status, body }
}

#[derive(Default)]
struct Stub {
    routes: Vec<Route>,
    recorded: Mutex<Vec<Recorded>>,
}

/// 桩服务：所有请求落到同一个 handler，记录后按预设路由回复
pub struct StubServer {
    pub base_url: String,
    stub: Arc<Stub>,
}

impl StubServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let stub = Arc::new(Stub { routes, ..Default::default() });
        let app = Router::new().fallback(answer).with_state(stub.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{}", addr), stub }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.stub.recorded.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn answer(State(stub): State<Arc<Stub>>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let target = uri.path_and_query().map(|p| p.as_str().to_string()).unwrap_or_else(|| uri.path().to_string());
    let matched = stub.routes.iter().find(|r| r.method == method.as_str() && uri.path().starts_with(r.path));
    let (status, payload) = matched.map(|r| (r.status, r.body)).unwrap_or((404, r#"{"message":"no route"}"#));

    stub.recorded.lock().unwrap().push(Recorded {
        method: method.to_string(),
        target,
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(CONTENT_TYPE, "application/json")], payload)
}
