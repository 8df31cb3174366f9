use crate::domain::model::DiagnosisForm;
use crate::utils::error::{Result, RxError};
use crate::utils::validation::Validate;

/// Fixed template for the prescription-analysis prompt.
pub fn prescription_prompt(extracted_text: &str) -> String {
    format!(
        "You are a medical assistant. The following text was extracted from a \
         prescription image:\n\n{}\n\nExplain in plain language which medicines \
         are prescribed, what each is typically used for, the dosage written, \
         and any general precautions. If something is illegible, say so rather \
         than guessing.",
        extracted_text
    )
}

/// Fixed template for the symptom-form prompt.
pub fn diagnosis_prompt(form: &DiagnosisForm) -> String {
    format!(
        "You are a medical assistant. A patient filled in the following form:\n\
         \nName: {}\nAge: {}\nSymptoms: {}\nKnown allergies: {}\nMedical \
         history: {}\n\nSuggest possible causes for the symptoms, general \
         advice, and whether the patient should see a doctor. Do not present \
         this as a definitive diagnosis.",
        form.name, form.age, form.symptoms, form.allergies, form.history
    )
}

impl Validate for DiagnosisForm {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RxError::ValidationError {
                field: "name".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.symptoms.trim().is_empty() {
            return Err(RxError::ValidationError {
                field: "symptoms".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.age > 120 {
            return Err(RxError::ValidationError {
                field: "age".to_string(),
                message: "must be between 0 and 120".to_string(),
            });
        }
        Ok(())
    }
}
