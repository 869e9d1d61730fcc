use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::PairingCode;

pub const PAIRING_NOT_AVAILABLE: &str = "Código de emparejamiento aún no disponible.";

/// Latest pairing emitted by the bridge. Starts empty; only the pairing
/// webhook event writes to it.
#[derive(Default)]
pub struct PairingState {
    current: RwLock<Option<PairingCode>>,
}

impl PairingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn update(&self, pairing: PairingCode) {
        log::info!("🔑 New pairing code received: {}", pairing.code);
        *self.current.write().await = Some(pairing);
    }

    pub async fn current(&self) -> Option<PairingCode> {
        self.current.read().await.clone()
    }
}

/// Operator routes: liveness page and the pairing code / QR image.
pub fn create_pairing_router(pairing: Arc<PairingState>) -> Router {
    Router::new()
        .route("/", get(status_page))
        .route("/qr", get(pairing_image))
        .route("/qr/code", get(pairing_code))
        .with_state(pairing)
}

async fn status_page(State(pairing): State<Arc<PairingState>>) -> Html<String> {
    let status = match pairing.current().await {
        Some(p) => format!(
            "Último código de emparejamiento recibido: {} UTC",
            p.received_at.format("%Y-%m-%d %H:%M:%S")
        ),
        None => PAIRING_NOT_AVAILABLE.to_string(),
    };

    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Sastrería Bot</title></head>\
         <body><h1>🧵 Sastrería Bot</h1><p>El bot está en línea.</p><p>{}</p>\
         <p><a href=\"/qr\">Ver QR</a> · <a href=\"/qr/code\">Código</a></p></body></html>",
        status
    ))
}

async fn pairing_image(State(pairing): State<Arc<PairingState>>) -> Response {
    match pairing.current().await.and_then(|p| p.image_png) {
        Some(png) => (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response(),
        None => (StatusCode::NOT_FOUND, PAIRING_NOT_AVAILABLE).into_response(),
    }
}

async fn pairing_code(State(pairing): State<Arc<PairingState>>) -> Response {
    match pairing.current().await {
        Some(p) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], p.code)
            .into_response(),
        None => (StatusCode::NOT_FOUND, PAIRING_NOT_AVAILABLE).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::Utc;
    use tower::ServiceExt;

    async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn test_not_available_before_pairing() {
        let state = Arc::new(PairingState::new());

        let (status, _, body) = get(create_pairing_router(state.clone()), "/qr/code").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, PAIRING_NOT_AVAILABLE.as_bytes());

        let (status, _, _) = get(create_pairing_router(state), "/qr").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serves_latest_pairing() {
        let state = Arc::new(PairingState::new());
        state
            .update(PairingCode {
                code: "first".to_string(),
                image_png: None,
                received_at: Utc::now(),
            })
            .await;
        state
            .update(PairingCode {
                code: "2@AbCdEf".to_string(),
                image_png: Some(vec![0x89, b'P', b'N', b'G']),
                received_at: Utc::now(),
            })
            .await;

        let (status, content_type, body) = get(create_pairing_router(state.clone()), "/qr/code").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(body, b"2@AbCdEf");

        let (status, content_type, body) = get(create_pairing_router(state), "/qr").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert_eq!(body, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_code_without_image() {
        let state = Arc::new(PairingState::new());
        state
            .update(PairingCode {
                code: "2@XyZ".to_string(),
                image_png: None,
                received_at: Utc::now(),
            })
            .await;

        let (status, _, _) = get(create_pairing_router(state.clone()), "/qr").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = get(create_pairing_router(state), "/qr/code").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"2@XyZ");
    }

    #[tokio::test]
    async fn test_status_page_is_live() {
        let state = Arc::new(PairingState::new());

        let (status, _, body) = get(create_pairing_router(state), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("El bot está en línea."));
    }
}
