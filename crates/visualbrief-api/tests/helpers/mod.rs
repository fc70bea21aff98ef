//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p visualbrief-api`.
//! The analysis provider is replaced by [`ScriptedProvider`], so no network is used.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use visualbrief_analysis::{AnalysisContext, AnalysisError, AnalysisProvider};
use visualbrief_api::setup::routes;
use visualbrief_api::state::AppState;
use visualbrief_core::{Config, ImagePayload};

/// How the fake provider answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Succeed,
    Fail,
}

#[derive(Debug)]
pub struct ScriptedProvider {
    script: Script,
    /// When set, `generate` waits for a notification before answering.
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last_image_count: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            gate: None,
            calls: AtomicUsize::new(0),
            last_image_count: AtomicUsize::new(0),
        }
    }

    pub fn gated(script: Script, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(script)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image_count(&self) -> usize {
        self.last_image_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn generate(&self, images: &[ImagePayload]) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_image_count.store(images.len(), Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.script {
            Script::Succeed => Ok(fixtures::brief_sections().to_string()),
            Script::Fail => Err(AnalysisError::Status {
                provider: "scripted",
                status: 503,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

/// Test application: server plus the pieces tests inspect directly.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub provider: Option<Arc<ScriptedProvider>>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config() -> Config {
    Config {
        progress_step_interval_ms: 50,
        ..Config::default()
    }
}

fn build(state: Arc<AppState>, provider: Option<Arc<ScriptedProvider>>) -> TestApp {
    let app = routes::setup_routes(&state.config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");
    TestApp {
        server,
        state,
        provider,
    }
}

/// App whose analysis provider answers according to `script`.
pub fn setup_test_app(script: Script) -> TestApp {
    setup_with_provider(Arc::new(ScriptedProvider::new(script)))
}

pub fn setup_with_provider(provider: Arc<ScriptedProvider>) -> TestApp {
    let context = Arc::new(AnalysisContext::with_provider(provider.clone()));
    let state = Arc::new(AppState::with_context(test_config(), context));
    build(state, Some(provider))
}

/// App built from configuration alone, with no API key set.
pub fn setup_unconfigured_app() -> TestApp {
    let config = Config {
        gemini_api_key: None,
        anthropic_api_key: None,
        ..test_config()
    };
    let state = Arc::new(AppState::new(config));
    build(state, None)
}

/// Poll the session until it reaches `state`, or panic after a few seconds.
pub async fn wait_for_state(server: &TestServer, state: &str) -> serde_json::Value {
    for _ in 0..100 {
        let snapshot: serde_json::Value = server.get("/api/session").await.json();
        if snapshot["state"] == state {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("session never reached state {}", state);
}
