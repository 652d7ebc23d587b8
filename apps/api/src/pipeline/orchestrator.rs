//! Pipeline Orchestrator: owns the fallback policy for both request paths.
//!
//! Collection: Idle → CheckingCorpusSize → (empty: Collecting → Idle) | Idle.
//! Topics are collected one at a time, paced by `TopicPacer`. When every topic
//! leaves the corpus empty, the synthetic topic seeds it with fallback insights.
//!
//! Analysis: ExtractingText → EnsuringCorpus → Analyzing → Persisting → Complete.
//! Provider failures never surface here; the analyzer always returns something.
//! Store read failures abort the request.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::ResumeAnalyzer;
use crate::insights::{Extraction, InsightExtractor};
use crate::llm_client::{Origin, Provider, ProviderChain};
use crate::models::feedback::{FeedbackItem, ScoreSet};
use crate::models::insight::InsightRecord;
use crate::pipeline::pacer::TopicPacer;
use crate::sources::ContentFetcher;
use crate::store::{PersistenceGateway, Store};

/// Collected without an upstream fetch; always yields the fallback list.
pub const SYNTHETIC_TOPIC: &str = "resume_best_practices";
/// Most recent insights fed into one analysis.
pub const CORPUS_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    CheckingCorpusSize,
    Collecting,
    ExtractingText,
    EnsuringCorpus,
    Analyzing,
    Persisting,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn enter(phase: Phase, subject: &str) {
    debug!(%phase, subject, "pipeline phase");
}

#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub posts_analyzed: usize,
    pub insights: Vec<InsightRecord>,
    pub stored: usize,
    pub origin: Origin,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Shared by the score row and every feedback row of this run.
    pub analysis_id: Uuid,
    pub feedback: Vec<FeedbackItem>,
    pub scores: ScoreSet,
    pub insights_used: usize,
    pub feedback_stored: usize,
    pub scores_stored: usize,
    pub origin: Origin,
}

pub struct Pipeline {
    store: Arc<dyn Store>,
    fetcher: Arc<dyn ContentFetcher>,
    extractor: InsightExtractor,
    analyzer: ResumeAnalyzer,
    gateway: PersistenceGateway,
    providers: Vec<Provider>,
    topics: Vec<String>,
    pacer: TopicPacer,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn Store>,
        fetcher: Arc<dyn ContentFetcher>,
        providers: ProviderChain,
        topics: Vec<String>,
        topic_interval: Duration,
    ) -> Self {
        Self {
            gateway: PersistenceGateway::new(store.clone()),
            providers: providers.providers(),
            store,
            fetcher,
            extractor: InsightExtractor::new(providers.clone()),
            analyzer: ResumeAnalyzer::new(providers),
            topics,
            pacer: TopicPacer::new(topic_interval),
        }
    }

    /// Providers in the order they are tried; empty means fallback only.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Fetch → extract → store for one topic. Always yields ten insights.
    pub async fn collect(&self, topic: &str) -> CollectionOutcome {
        let documents = self.fetcher.fetch(topic).await;
        let extraction = self.extractor.extract(topic, &documents).await;
        self.persist_extraction(topic, documents.len(), extraction)
            .await
    }

    async fn collect_synthetic(&self) -> CollectionOutcome {
        let extraction = self.extractor.extract(SYNTHETIC_TOPIC, &[]).await;
        self.persist_extraction(SYNTHETIC_TOPIC, 0, extraction).await
    }

    async fn persist_extraction(
        &self,
        topic: &str,
        posts_analyzed: usize,
        extraction: Extraction,
    ) -> CollectionOutcome {
        let stored = self
            .gateway
            .store_insights(topic, &extraction.records)
            .await;
        info!(
            "Collected r/{topic}: {} posts, {} insights ({}), {} stored",
            posts_analyzed,
            extraction.records.len(),
            extraction.origin.label(),
            stored
        );
        CollectionOutcome {
            posts_analyzed,
            insights: extraction.records,
            stored,
            origin: extraction.origin,
        }
    }

    /// Makes sure the insight corpus is non-empty, collecting every configured
    /// topic if it is not. Returns the corpus size afterwards.
    pub async fn ensure_corpus(&self) -> Result<i64> {
        enter(Phase::CheckingCorpusSize, "corpus");
        let existing = self.store.count_insights().await?;
        if existing > 0 {
            enter(Phase::Idle, "corpus");
            return Ok(existing);
        }

        enter(Phase::Collecting, "corpus");
        info!(
            "Insight corpus is empty, collecting {} topics",
            self.topics.len()
        );
        for topic in &self.topics {
            self.pacer.ready().await;
            self.collect(topic).await;
        }

        let mut count = self.store.count_insights().await?;
        if count == 0 {
            warn!("Corpus still empty after collection, seeding from r/{SYNTHETIC_TOPIC}");
            self.collect_synthetic().await;
            count = self.store.count_insights().await?;
        }

        enter(Phase::Idle, "corpus");
        Ok(count)
    }

    /// Scores one resume against the current corpus and stores the result
    /// under a freshly minted analysis id.
    pub async fn analyze(&self, resume_id: &str, resume_text: &str) -> Result<AnalysisOutcome> {
        let analysis_id = Uuid::new_v4();
        enter(Phase::ExtractingText, resume_id);
        let resume_text = resume_text.trim();

        enter(Phase::EnsuringCorpus, resume_id);
        let mut corpus = self.store.recent_insights(CORPUS_LIMIT).await?;
        if corpus.is_empty() {
            self.ensure_corpus().await?;
            corpus = self.store.recent_insights(CORPUS_LIMIT).await?;
        }
        info!(
            "Analyzing resume {resume_id} against {} insights",
            corpus.len()
        );

        enter(Phase::Analyzing, resume_id);
        let analysis = self.analyzer.analyze(resume_id, resume_text, &corpus).await;

        enter(Phase::Persisting, resume_id);
        let feedback_stored = self
            .gateway
            .store_feedback(resume_id, analysis_id, &analysis.feedback)
            .await;
        let scores_stored = self
            .gateway
            .store_scores(resume_id, analysis_id, &analysis.scores)
            .await;

        enter(Phase::Complete, resume_id);
        Ok(AnalysisOutcome {
            analysis_id,
            feedback: analysis.feedback,
            scores: analysis.scores,
            insights_used: corpus.len(),
            feedback_stored,
            scores_stored,
            origin: analysis.origin,
        })
    }
}
