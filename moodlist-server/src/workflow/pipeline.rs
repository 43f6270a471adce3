//! Operation pipelines
//!
//! Each public operation is a short sequential pipeline: validate,
//! classify (optional), map moods (optional), invoke the engine
//! (optional), assemble. Any stage failure short-circuits the rest via
//! `?` and surfaces as one error envelope; no partial results.
//!
//! The pipeline owns its collaborators behind narrow traits, so tests
//! wire in doubles for both the classifier and the catalog filter.

use crate::error::{ApiError, ApiResult};
use crate::models::{ClassificationResult, PlaylistQuery, PlaylistSelection};
use crate::services::{aggregator, CatalogFilter, ClassifierHandle};
use crate::taxonomy::Mood;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Combined response of the full pipeline operation
#[derive(Debug, Serialize)]
pub struct FullAnalysis {
    pub text: String,
    pub classification: ClassificationResult,
    pub playlist: PlaylistSelection,
}

/// Operation pipelines over the classifier and the catalog filter
pub struct Pipeline {
    classifier: ClassifierHandle,
    catalog_filter: Arc<dyn CatalogFilter>,
    catalog_path: PathBuf,
}

impl Pipeline {
    pub fn new(
        classifier: ClassifierHandle,
        catalog_filter: Arc<dyn CatalogFilter>,
        catalog_path: PathBuf,
    ) -> Self {
        Self {
            classifier,
            catalog_filter,
            catalog_path,
        }
    }

    /// Classify-only: validate → classify → aggregate
    ///
    /// No engine invocation; `moods` may come back empty.
    pub async fn classify(
        &self,
        text: &str,
        top_k: usize,
        threshold: f32,
    ) -> ApiResult<ClassificationResult> {
        let text = validate_text(text)?;
        validate_top_k(top_k)?;

        let classifier = self.classifier.get().await?;
        let distribution = classifier.classify(text).await?;
        let result = aggregator::aggregate(text, &distribution, top_k, threshold)?;

        debug!(
            dominant = %result.dominant_label,
            confidence = result.confidence,
            moods = ?result.moods,
            "Classification complete"
        );

        Ok(result)
    }

    /// Playlist-only: validate → invoke engine
    ///
    /// Mood tags are passed to the engine as given (trimmed); the
    /// engine owns tag matching.
    pub async fn playlist(&self, moods: &[String]) -> ApiResult<PlaylistSelection> {
        let moods = validate_moods(moods)?;

        let query = PlaylistQuery {
            catalog_path: self.catalog_path.clone(),
            moods,
        };
        let result = self.catalog_filter.filter(&query).await?;

        info!(moods = ?query.moods, count = result.count, "Playlist selected");

        Ok(PlaylistSelection::new(query.moods, result))
    }

    /// Full pipeline: validate → classify → normalize moods → invoke
    /// engine → assemble
    ///
    /// This is the one place an empty aggregated mood set is
    /// normalized to `[neutral]` before reaching the engine.
    pub async fn full_pipeline(
        &self,
        text: &str,
        top_k: usize,
        threshold: f32,
    ) -> ApiResult<FullAnalysis> {
        let classification = self.classify(text, top_k, threshold).await?;

        let mut moods: Vec<String> = classification
            .moods
            .iter()
            .map(|mood| mood.as_str().to_string())
            .collect();
        if moods.is_empty() {
            moods.push(Mood::Neutral.as_str().to_string());
        }

        let query = PlaylistQuery {
            catalog_path: self.catalog_path.clone(),
            moods,
        };
        let result = self.catalog_filter.filter(&query).await?;

        info!(
            dominant = %classification.dominant_label,
            moods = ?query.moods,
            count = result.count,
            "Full pipeline complete"
        );

        Ok(FullAnalysis {
            text: classification.text.clone(),
            classification,
            playlist: PlaylistSelection::new(query.moods, result),
        })
    }
}

/// Reject absent or blank input text
fn validate_text(text: &str) -> ApiResult<&str> {
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "text must be a non-empty string".to_string(),
        ));
    }
    Ok(text)
}

/// Reject a non-positive top-k before the pipeline starts
fn validate_top_k(top_k: usize) -> ApiResult<()> {
    if top_k == 0 {
        return Err(ApiError::BadRequest(
            "top_k must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Reject an empty mood list or blank entries; returns trimmed tags
fn validate_moods(moods: &[String]) -> ApiResult<Vec<String>> {
    if moods.is_empty() {
        return Err(ApiError::BadRequest(
            "moods must be a non-empty list".to_string(),
        ));
    }

    let mut validated = Vec::with_capacity(moods.len());
    for mood in moods {
        let trimmed = mood.trim();
        if trimmed.is_empty() {
            return Err(ApiError::BadRequest(
                "all moods must be non-empty strings".to_string(),
            ));
        }
        validated.push(trimmed.to_string());
    }
    Ok(validated)
}
