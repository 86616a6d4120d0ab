/**
 * Channel host
 * Carries method calls and USB events to the bridge over HTTP
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bridge::FingerprintBridge;
use crate::channel::{Envelope, MethodCall};
use crate::device::FingerprintScanner;
use crate::usb::{UsbAction, UsbEvent};

pub type SharedBridge<S> = Arc<Mutex<FingerprintBridge<S>>>;

pub struct AppState<S> {
    bridge: SharedBridge<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            bridge: Arc::clone(&self.bridge),
        }
    }
}

pub fn router<S>(bridge: SharedBridge<S>, channel: &str) -> Router
where
    S: FingerprintScanner + 'static,
{
    let state = AppState { bridge };

    Router::new()
        .route("/health", get(health))
        .route(&format!("/channel/{}", channel), post(method_call::<S>))
        .route("/usb/events", post(usb_event::<S>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn method_call<S: FingerprintScanner + 'static>(
    State(state): State<AppState<S>>,
    Json(call): Json<MethodCall>,
) -> Json<Envelope> {
    info!("Method call: {}", call.method);

    // Holding the lock for the whole call keeps commands strictly sequential.
    let mut bridge = state.bridge.lock().await;
    Json(bridge.invoke(call).await)
}

async fn usb_event<S: FingerprintScanner + 'static>(
    State(state): State<AppState<S>>,
    Json(event): Json<UsbEvent>,
) -> Json<UsbAction> {
    let mut bridge = state.bridge.lock().await;
    Json(bridge.handle_usb_event(event).await)
}
