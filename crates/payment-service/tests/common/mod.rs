#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use payment_service::{AppState, GatewayClient, ServiceConfig};

pub const STUB_SECRET_KEY: &str = "sk_test_stub";

/// What the stub processor saw for one charge call.
#[derive(Debug, Clone)]
pub struct SeenCharge {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Charge processor stand-in served on an ephemeral local port.
pub struct StubProcessor {
    pub url: String,
    handle: ServerHandle,
    seen: web::Data<Mutex<Vec<SeenCharge>>>,
}

impl StubProcessor {
    pub async fn start(status: u16, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: &'static str, delay: Duration) -> Self {
        let seen = web::Data::new(Mutex::new(Vec::<SeenCharge>::new()));
        let app_seen = seen.clone();

        let server = HttpServer::new(move || {
            App::new().app_data(app_seen.clone()).route(
                "/v1/charges",
                web::post().to(
                    move |req: HttpRequest,
                          payload: web::Bytes,
                          seen: web::Data<Mutex<Vec<SeenCharge>>>| async move {
                        let header = |name: &str| {
                            req.headers()
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string)
                        };
                        seen.lock().unwrap().push(SeenCharge {
                            authorization: header("authorization"),
                            content_type: header("content-type"),
                            body: String::from_utf8_lossy(&payload).into_owned(),
                        });
                        if !delay.is_zero() {
                            actix_rt::time::sleep(delay).await;
                        }
                        HttpResponse::build(StatusCode::from_u16(status).unwrap())
                            .content_type("application/json")
                            .body(body)
                    },
                ),
            )
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            url: format!("http://{addr}"),
            handle,
            seen,
        }
    }

    pub fn seen(&self) -> Vec<SeenCharge> {
        self.seen.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Serves one response whose body is cut short of its declared length.
pub async fn start_truncating_processor() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    actix_rt::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"id\"",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}

pub fn gateway_client(url: &str, timeout: Duration) -> GatewayClient {
    GatewayClient::new(url, STUB_SECRET_KEY, timeout).unwrap()
}

pub fn mock_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(ServiceConfig::default()).unwrap())
}

pub fn gateway_state(url: &str) -> web::Data<AppState> {
    let config = ServiceConfig {
        gateway_url: Some(url.to_string()),
        gateway_secret_key: STUB_SECRET_KEY.to_string(),
        ..ServiceConfig::default()
    };
    web::Data::new(AppState::new(config).unwrap())
}
