//! Shared, async access to the session.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;
use visualbrief_analysis::BriefClient;
use visualbrief_core::CreativeBrief;
use visualbrief_processing::CandidateFile;

use crate::error::SessionError;
use crate::session::{AnalysisTicket, Completion, Session, SessionSnapshot};

/// Cloneable handle pairing the session with the client that serves it.
///
/// The lock is never held while the analysis request is in flight.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<Session>>,
    client: BriefClient,
}

impl SessionHandle {
    pub fn new(session: Session, client: BriefClient) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            client,
        }
    }

    pub fn client(&self) -> &BriefClient {
        &self.client
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn brief(&self) -> Option<Arc<CreativeBrief>> {
        self.session.lock().await.brief()
    }

    pub async fn add_files(
        &self,
        files: Vec<CandidateFile>,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut session = self.session.lock().await;
        session.add_files(files).await?;
        Ok(session.snapshot())
    }

    pub async fn remove_asset(&self, id: Uuid) -> bool {
        self.session.lock().await.remove_asset(id)
    }

    pub async fn cancel(&self) -> bool {
        self.session.lock().await.cancel()
    }

    pub async fn reset(&self) {
        self.session.lock().await.reset()
    }

    /// Run an analysis to completion.
    pub async fn analyze(&self) -> Result<Completion, SessionError> {
        let ticket = self.session.lock().await.start_analysis()?;
        Ok(self.run(ticket).await)
    }

    /// Start an analysis in the background. Fails immediately if it cannot start.
    pub async fn spawn_analysis(&self) -> Result<JoinHandle<Completion>, SessionError> {
        let ticket = self.session.lock().await.start_analysis()?;
        let handle = self.clone();
        Ok(tokio::spawn(async move { handle.run(ticket).await }))
    }

    async fn run(&self, ticket: AnalysisTicket) -> Completion {
        let result = self.client.analyze(&ticket.assets).await;
        self.session.lock().await.complete(ticket.generation, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::codecs::jpeg::JpegEncoder;
    use image::{Rgb, RgbImage};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Notify;
    use visualbrief_analysis::{AnalysisContext, AnalysisError, AnalysisProvider};
    use visualbrief_core::{AnalysisState, ImagePayload};

    fn brief_text() -> String {
        json!({
            "visualStyle": {
                "colorPalette": { "primary": "#111111", "secondary": ["#EEEEEE"], "accent": "#00AAFF" },
                "typography": { "style": "Geometric Sans", "hierarchy": "Large headlines" },
                "layoutPatterns": [], "visualMotifs": ["Lines"]
            },
            "brandVoice": { "tone": "Playful", "personality": ["Witty"], "emotionalAppeal": "Joy" },
            "messaging": { "keyThemes": ["Fun"], "callToActionStyle": "Casual", "valueProposition": "Smiles" },
            "targetAudience": { "inferredDemographic": "Families", "psychographics": ["Curious"] },
            "recommendations": { "doThis": ["Bright colors"], "avoidThis": ["Jargon"], "contentIdeas": [] }
        })
        .to_string()
    }

    #[derive(Debug)]
    struct ScriptedProvider {
        succeed: bool,
        /// When set, `generate` waits for a notification before answering.
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl AnalysisProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn generate(&self, _images: &[ImagePayload]) -> Result<String, AnalysisError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.succeed {
                Ok(brief_text())
            } else {
                Err(AnalysisError::Status {
                    provider: "scripted",
                    status: 500,
                    body: "boom".to_string(),
                })
            }
        }
    }

    fn handle(succeed: bool, gate: Option<Arc<Notify>>) -> SessionHandle {
        let provider = Arc::new(ScriptedProvider { succeed, gate });
        let client = BriefClient::new(Arc::new(AnalysisContext::with_provider(provider)));
        SessionHandle::new(Session::default(), client)
    }

    fn noise_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
        let mut seed: u32 = 0x9E37_79B9;
        let img = RgbImage::from_fn(width, height, |_, _| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let [r, g, b, _] = seed.to_le_bytes();
            Rgb([r, g, b])
        });
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, quality)
            .encode_image(&img)
            .unwrap();
        buffer
    }

    /// Noisy JPEG, so the encoded size is realistic.
    fn jpeg_file(name: &str, width: u32, height: u32) -> CandidateFile {
        CandidateFile::new(name, "image/jpeg", noise_jpeg(width, height, 75))
    }

    /// Noisy 4:3 JPEG grown until it reaches `min_bytes`.
    fn jpeg_file_of_at_least(name: &str, min_bytes: usize) -> CandidateFile {
        let (mut width, mut height) = (400, 300);
        loop {
            let data = noise_jpeg(width, height, 100);
            if data.len() >= min_bytes {
                return CandidateFile::new(name, "image/jpeg", data);
            }
            width = width * 11 / 10;
            height = height * 11 / 10;
        }
    }

    #[tokio::test]
    async fn test_two_jpegs_end_to_end() {
        let handle = handle(true, None);
        const MIB: usize = 1024 * 1024;
        let files = vec![
            jpeg_file_of_at_least("hero.jpg", 2 * MIB),
            jpeg_file_of_at_least("banner.jpg", 3 * MIB),
        ];
        assert!((2 * MIB..3 * MIB).contains(&files[0].size()));
        assert!((3 * MIB..=5 * MIB).contains(&files[1].size()));

        let snapshot = handle.add_files(files).await.unwrap();
        assert_eq!(snapshot.assets.len(), 2);
        assert!(snapshot.error.is_none());
        assert!(snapshot
            .assets
            .iter()
            .all(|a| a.width.max(a.height) <= 1024 && a.media_type == "image/jpeg"));

        let outcome = handle.analyze().await.unwrap();
        assert_eq!(outcome, Completion::Succeeded);

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.state, AnalysisState::ShowingResult);
        assert_eq!(handle.brief().await.unwrap().meta.image_count, 2);
    }

    #[tokio::test]
    async fn test_failure_preserves_assets() {
        let handle = handle(false, None);
        handle
            .add_files(vec![jpeg_file("a.jpg", 64, 64)])
            .await
            .unwrap();

        assert_eq!(handle.analyze().await.unwrap(), Completion::Failed);

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.state, AnalysisState::Collecting);
        assert_eq!(snapshot.assets.len(), 1);
        assert!(snapshot.error.unwrap().starts_with("Failed to analyze images."));
    }

    #[tokio::test]
    async fn test_cancel_discards_late_result() {
        let gate = Arc::new(Notify::new());
        let handle = handle(true, Some(gate.clone()));
        handle
            .add_files(vec![jpeg_file("a.jpg", 64, 64)])
            .await
            .unwrap();

        let task = handle.spawn_analysis().await.unwrap();
        assert_eq!(handle.snapshot().await.state, AnalysisState::Analyzing);
        assert!(handle.spawn_analysis().await.is_err());

        assert!(handle.cancel().await);
        gate.notify_one();

        assert_eq!(task.await.unwrap(), Completion::Stale);
        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.state, AnalysisState::Collecting);
        assert!(handle.brief().await.is_none());
        assert_eq!(snapshot.assets.len(), 1);
    }

    #[tokio::test]
    async fn test_lock_not_held_during_request() {
        let gate = Arc::new(Notify::new());
        let handle = handle(true, Some(gate.clone()));
        handle
            .add_files(vec![jpeg_file("a.jpg", 64, 64)])
            .await
            .unwrap();

        let task = handle.spawn_analysis().await.unwrap();
        // Snapshot is served while the request is pending.
        let snapshot = tokio::time::timeout(Duration::from_secs(1), handle.snapshot())
            .await
            .unwrap();
        assert_eq!(snapshot.state, AnalysisState::Analyzing);

        gate.notify_one();
        assert_eq!(task.await.unwrap(), Completion::Succeeded);
    }
}
