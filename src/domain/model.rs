use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::Result;

/// Raw uploaded image. Lives for one request only.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(&path)?;
        let mime_type = match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Ok(Self::new(bytes, mime_type))
    }
}

/// Preprocessed (grayscale, optionally thresholded) image, re-encoded as PNG.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorListing {
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub location: Coordinates,
}

/// Outcome of one nearby-doctor search: the resolved center plus listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSearch {
    pub center: Coordinates,
    pub listings: Vec<DoctorListing>,
}

/// User-entered symptom form; only presence checks are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisForm {
    pub name: String,
    pub age: u32,
    pub symptoms: String,
    pub allergies: String,
    pub history: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The OCR service found no text; the reasoning call is skipped.
    NoTextDetected,
    Analyzed {
        extracted_text: String,
        assessment: String,
    },
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub prepared: PreparedImage,
    pub outcome: AnalysisOutcome,
    pub generated_at: DateTime<Utc>,
}
