use crate::core::preprocess::{self, PreprocessOptions};
use crate::core::{normalize, prompt};
use crate::domain::model::{AnalysisOutcome, AnalysisReport, DiagnosisForm, ImageData};
use crate::domain::ports::{OcrProvider, ReasoningProvider};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::Utc;

/// The analysis flow: preprocess -> detect text -> normalize -> prompt ->
/// assess. Strictly sequential, one awaited call at a time, no retries.
pub struct AnalysisPipeline<O, R> {
    ocr: O,
    reasoning: R,
    options: PreprocessOptions,
}

impl<O: OcrProvider, R: ReasoningProvider> AnalysisPipeline<O, R> {
    pub fn new(ocr: O, reasoning: R, options: PreprocessOptions) -> Self {
        Self {
            ocr,
            reasoning,
            options,
        }
    }

    pub async fn run(&self, image: &ImageData) -> Result<AnalysisReport> {
        tracing::info!("Preprocessing image ({} bytes)", image.bytes.len());
        let prepared = preprocess::prepare(image, self.options)?;

        tracing::info!("Detecting text...");
        let outcome = match self.ocr.detect_text(&prepared.png).await? {
            None => {
                // Nothing to reason about; the report still renders.
                tracing::warn!("No text detected, skipping assessment");
                AnalysisOutcome::NoTextDetected
            }
            Some(raw) => {
                let extracted_text = normalize::normalize_extracted(&raw);
                tracing::info!("Extracted {} characters", extracted_text.len());

                tracing::info!("Requesting assessment...");
                let assessment = self
                    .reasoning
                    .assess(&prompt::prescription_prompt(&extracted_text))
                    .await?;
                AnalysisOutcome::Analyzed {
                    extracted_text,
                    assessment,
                }
            }
        };

        Ok(AnalysisReport {
            prepared,
            outcome,
            generated_at: Utc::now(),
        })
    }

    /// Symptom-form variant: no image involved, the form fields go straight
    /// into the prompt. Validation failures never reach the service.
    pub async fn diagnose(&self, form: &DiagnosisForm) -> Result<String> {
        form.validate()?;
        tracing::info!("Requesting assessment for symptom form...");
        self.reasoning.assess(&prompt::diagnosis_prompt(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RxError;
    use async_trait::async_trait;
    use image::{Luma, GrayImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockOcr {
        text: Option<String>,
    }

    #[async_trait]
    impl OcrProvider for MockOcr {
        async fn detect_text(&self, _png: &[u8]) -> Result<Option<String>> {
            Ok(self.text.clone())
        }
    }

    #[derive(Clone)]
    struct MockReasoning {
        answer: String,
        calls: Arc<AtomicUsize>,
    }

    impl MockReasoning {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ReasoningProvider for MockReasoning {
        async fn assess(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.clone())
        }
    }

    fn sample_image() -> ImageData {
        let img = GrayImage::from_pixel(4, 4, Luma([128]));
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();
        ImageData::new(png.into_inner(), "image/png")
    }

    #[tokio::test]
    async fn test_run_normalizes_and_assesses() {
        let ocr = MockOcr {
            text: Some("Amoxicillin 500mg\nTwice  daily".to_string()),
        };
        let reasoning = MockReasoning::new("An antibiotic, taken twice a day.");
        let pipeline = AnalysisPipeline::new(ocr, reasoning.clone(), PreprocessOptions::default());

        let report = pipeline.run(&sample_image()).await.unwrap();

        match report.outcome {
            AnalysisOutcome::Analyzed {
                extracted_text,
                assessment,
            } => {
                assert_eq!(extracted_text, "Amoxicillin 500mg Twice daily");
                assert_eq!(assessment, "An antibiotic, taken twice a day.");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(reasoning.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_no_text_skips_reasoning() {
        let ocr = MockOcr { text: None };
        let reasoning = MockReasoning::new("should never be returned");
        let pipeline = AnalysisPipeline::new(ocr, reasoning.clone(), PreprocessOptions::default());

        let report = pipeline.run(&sample_image()).await.unwrap();

        assert_eq!(report.outcome, AnalysisOutcome::NoTextDetected);
        assert_eq!(reasoning.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_diagnose_empty_symptoms_never_calls_service() {
        let ocr = MockOcr { text: None };
        let reasoning = MockReasoning::new("should never be returned");
        let pipeline = AnalysisPipeline::new(ocr, reasoning.clone(), PreprocessOptions::default());

        let form = DiagnosisForm {
            name: "Asha".to_string(),
            age: 34,
            symptoms: "".to_string(),
            allergies: "".to_string(),
            history: "".to_string(),
        };

        let err = pipeline.diagnose(&form).await.unwrap_err();
        assert!(matches!(err, RxError::ValidationError { ref field, .. } if field == "symptoms"));
        assert_eq!(reasoning.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_diagnose_valid_form_returns_assessment() {
        let ocr = MockOcr { text: None };
        let reasoning = MockReasoning::new("Likely a viral infection; rest and fluids.");
        let pipeline = AnalysisPipeline::new(ocr, reasoning.clone(), PreprocessOptions::default());

        let form = DiagnosisForm {
            name: "Asha".to_string(),
            age: 34,
            symptoms: "fever, sore throat".to_string(),
            allergies: "none".to_string(),
            history: "none".to_string(),
        };

        let answer = pipeline.diagnose(&form).await.unwrap();
        assert_eq!(answer, "Likely a viral infection; rest and fluids.");
        assert_eq!(reasoning.calls.load(Ordering::SeqCst), 1);
    }
}
