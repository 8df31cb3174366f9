use crate::domain::model::{AnalysisOutcome, AnalysisReport, DiagnosisForm, DoctorSearch};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};

/// Static-markup rendering of the analysis result: the preprocessed image
/// inline as a data URI, the extracted text, the assessment, and doctor
/// cards when a search ran. Plain string assembly, no template engine.
pub fn render_analysis_report(report: &AnalysisReport, doctors: Option<&DoctorSearch>) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "<section><h2>Uploaded prescription</h2>\
         <img src=\"data:image/png;base64,{}\" alt=\"prescription ({}x{})\" /></section>",
        BASE64_STANDARD.encode(&report.prepared.png),
        report.prepared.width,
        report.prepared.height
    ));

    match &report.outcome {
        AnalysisOutcome::NoTextDetected => {
            sections.push(
                "<section><h2>Extracted text</h2><p class=\"error\">No text detected</p></section>"
                    .to_string(),
            );
        }
        AnalysisOutcome::Analyzed {
            extracted_text,
            assessment,
        } => {
            sections.push(format!(
                "<section><h2>Extracted text</h2><p>{}</p></section>",
                html_escape(extracted_text)
            ));
            sections.push(format!(
                "<section><h2>Assessment</h2><p>{}</p></section>",
                html_escape(assessment)
            ));
        }
    }

    if let Some(search) = doctors {
        sections.push(doctor_cards(search));
    }

    page("Prescription analysis", &sections, report.generated_at)
}

pub fn render_diagnosis_report(
    form: &DiagnosisForm,
    assessment: &str,
    doctors: Option<&DoctorSearch>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "<section><h2>Submitted form</h2><ul>\
         <li>Name: {}</li><li>Age: {}</li><li>Symptoms: {}</li>\
         <li>Allergies: {}</li><li>History: {}</li></ul></section>",
        html_escape(&form.name),
        form.age,
        html_escape(&form.symptoms),
        html_escape(&form.allergies),
        html_escape(&form.history)
    ));
    sections.push(format!(
        "<section><h2>Assessment</h2><p>{}</p></section>",
        html_escape(assessment)
    ));

    if let Some(search) = doctors {
        sections.push(doctor_cards(search));
    }

    page("Symptom assessment", &sections, generated_at)
}

fn doctor_cards(search: &DoctorSearch) -> String {
    let mut cards = String::new();
    for doctor in &search.listings {
        let rating = doctor
            .rating
            .map(|r| format!("{:.1} / 5", r))
            .unwrap_or_else(|| "unrated".to_string());
        cards.push_str(&format!(
            "<div class=\"card\"><h3>{}</h3><p>{}</p><p>Rating: {}</p>\
             <a href=\"https://www.google.com/maps/search/?api=1&amp;query={},{}\">Map</a></div>",
            html_escape(&doctor.name),
            html_escape(&doctor.address),
            rating,
            doctor.location.lat,
            doctor.location.lng
        ));
    }

    if cards.is_empty() {
        cards.push_str("<p class=\"error\">No doctors found nearby</p>");
    }

    format!(
        "<section><h2>Doctors near {:.4},{:.4}</h2>{}</section>",
        search.center.lat, search.center.lng, cards
    )
}

fn page(title: &str, sections: &[String], generated_at: DateTime<Utc>) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body><h1>{}</h1>\n{}\n<footer>Generated at {}</footer></body></html>\n",
        html_escape(title),
        html_escape(title),
        sections.join("\n"),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Coordinates, DoctorListing, PreparedImage};

    fn sample_report(outcome: AnalysisOutcome) -> AnalysisReport {
        AnalysisReport {
            prepared: PreparedImage {
                png: vec![1, 2, 3],
                width: 4,
                height: 4,
            },
            outcome,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_no_text_detected() {
        let html = render_analysis_report(&sample_report(AnalysisOutcome::NoTextDetected), None);
        assert!(html.contains("No text detected"));
        assert!(html.contains("data:image/png;base64,"));
        assert!(!html.contains("Assessment"));
    }

    #[test]
    fn test_render_analysis_escapes_model_output() {
        let html = render_analysis_report(
            &sample_report(AnalysisOutcome::Analyzed {
                extracted_text: "Amoxicillin <500mg>".to_string(),
                assessment: "Take \"twice\" daily & rest".to_string(),
            }),
            None,
        );
        assert!(html.contains("Amoxicillin &lt;500mg&gt;"));
        assert!(html.contains("Take &quot;twice&quot; daily &amp; rest"));
    }

    #[test]
    fn test_doctor_cards_contain_map_links() {
        let search = DoctorSearch {
            center: Coordinates::new(51.5, -0.12),
            listings: vec![DoctorListing {
                name: "City Clinic".to_string(),
                address: "12 High Street".to_string(),
                rating: Some(4.3),
                location: Coordinates::new(51.5, -0.12),
            }],
        };

        let html =
            render_analysis_report(&sample_report(AnalysisOutcome::NoTextDetected), Some(&search));
        assert!(html.contains("City Clinic"));
        assert!(html.contains("12 High Street"));
        assert!(html.contains("4.3 / 5"));
        assert!(html.contains("https://www.google.com/maps/search/?api=1&amp;query=51.5,-0.12"));
    }

    #[test]
    fn test_empty_search_renders_error_line() {
        let search = DoctorSearch {
            center: Coordinates::new(51.5, -0.12),
            listings: vec![],
        };
        let html =
            render_analysis_report(&sample_report(AnalysisOutcome::NoTextDetected), Some(&search));
        assert!(html.contains("No doctors found nearby"));
    }

    #[test]
    fn test_render_diagnosis_report() {
        let form = DiagnosisForm {
            name: "Asha".to_string(),
            age: 34,
            symptoms: "fever".to_string(),
            allergies: "none".to_string(),
            history: "none".to_string(),
        };
        let html = render_diagnosis_report(&form, "Rest and fluids.", None, Utc::now());
        assert!(html.contains("Asha"));
        assert!(html.contains("Rest and fluids."));
        assert!(html.contains("Symptom assessment"));
    }
}
