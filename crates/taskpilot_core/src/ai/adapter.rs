//! Topic suggestion and activity analysis over a `TextGenerator`.

use super::prompts::{
    build_analysis_prompt, strip_emphasis, ANALYSIS_EMPTY_MESSAGE, ANALYSIS_ERROR_PREFIX,
    ANALYSIS_UNAVAILABLE_MESSAGE, FALLBACK_TOPICS, TOPIC_PROMPT,
};
use super::snapshot::ActivitySnapshot;
use super::{GeminiClient, TextGenerator};
use crate::config::AiConfig;
use log::{error, info, warn};
use rand::seq::SliceRandom;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Sole boundary converting generative-text faults into display values.
#[derive(Clone)]
pub struct AiAdapter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AiAdapter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Adapter without a service; every call takes its fallback path.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    /// Builds the Gemini-backed adapter, or a disabled one when no key is set
    /// or the HTTP client cannot be built.
    pub fn from_config(config: &AiConfig) -> Self {
        match GeminiClient::from_config(config) {
            Ok(Some(client)) => {
                info!(
                    "event=ai_init module=ai status=ok model={} timeout_ms={}",
                    config.model,
                    config.timeout.as_millis()
                );
                Self::new(Arc::new(client))
            }
            Ok(None) => {
                warn!("event=ai_init module=ai status=disabled reason=missing_api_key");
                Self::disabled()
            }
            Err(err) => {
                error!(
                    "event=ai_init module=ai status=error error_kind={} error={}",
                    err.kind(),
                    err
                );
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Returns a study topic; never empty.
    ///
    /// Falls back to a random entry of `FALLBACK_TOPICS` when the service is
    /// missing, fails, or answers with nothing.
    pub fn suggest_topic(&self) -> String {
        let Some(generator) = &self.generator else {
            info!("event=ai_topic module=ai status=fallback reason=disabled");
            return random_fallback_topic();
        };

        let started_at = Instant::now();
        match generator.generate(TOPIC_PROMPT) {
            Ok(raw) => {
                let topic = strip_emphasis(&raw);
                if topic.is_empty() {
                    warn!(
                        "event=ai_topic module=ai status=fallback reason=empty duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                    return random_fallback_topic();
                }
                info!(
                    "event=ai_topic module=ai status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                topic
            }
            Err(err) => {
                warn!(
                    "event=ai_topic module=ai status=fallback reason=error error_kind={} duration_ms={} error={}",
                    err.kind(),
                    started_at.elapsed().as_millis(),
                    err
                );
                random_fallback_topic()
            }
        }
    }

    /// Returns the service's analysis of `snapshot`, or a fixed message
    /// describing why there is none.
    pub fn summarize_activity(&self, snapshot: &ActivitySnapshot) -> String {
        let Some(generator) = &self.generator else {
            info!("event=ai_analysis module=ai status=unavailable reason=disabled");
            return ANALYSIS_UNAVAILABLE_MESSAGE.to_string();
        };

        let started_at = Instant::now();
        let prompt = build_analysis_prompt(snapshot);
        match generator.generate(&prompt) {
            Ok(raw) => {
                let analysis = strip_emphasis(&raw);
                if analysis.is_empty() {
                    warn!(
                        "event=ai_analysis module=ai status=empty duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                    return ANALYSIS_EMPTY_MESSAGE.to_string();
                }
                info!(
                    "event=ai_analysis module=ai status=ok tasks={} lists={} reminders={} duration_ms={}",
                    snapshot.tasks.len(),
                    snapshot.list_titles.len(),
                    snapshot.reminders.len(),
                    started_at.elapsed().as_millis()
                );
                analysis
            }
            Err(err) => {
                error!(
                    "event=ai_analysis module=ai status=error error_kind={} duration_ms={} error={}",
                    err.kind(),
                    started_at.elapsed().as_millis(),
                    err
                );
                format!("{ANALYSIS_ERROR_PREFIX}{err}")
            }
        }
    }
}

impl Debug for AiAdapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiAdapter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn random_fallback_topic() -> String {
    FALLBACK_TOPICS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_TOPICS[0])
        .to_string()
}
