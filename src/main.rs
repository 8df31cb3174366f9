use chrono::Utc;
use clap::Parser;
use rxlens::core::preprocess::PreprocessOptions;
use rxlens::core::report;
use rxlens::domain::model::{AnalysisOutcome, DiagnosisForm, ImageData};
use rxlens::utils::{logger, validation, validation::Validate};
use rxlens::{
    AnalysisPipeline, Cli, Command, DoctorLocator, HttpCompletionClient, HttpGeocodeClient,
    HttpOcrClient, HttpPlacesClient, ServicesConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting rxlens");

    let config = match ServicesConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    match run(cli.command, &config).await {
        Ok(summary) => {
            tracing::info!("✅ {}", summary);
            println!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

async fn run(command: Command, config: &ServicesConfig) -> rxlens::Result<String> {
    match command {
        Command::Analyze {
            image,
            threshold,
            postal_code,
            output,
        } => {
            validation::validate_file_extension("image", &image, &["png", "jpg", "jpeg", "webp"])?;
            let data = ImageData::from_path(&image)?;

            let pipeline = analysis_pipeline(config, PreprocessOptions { threshold });
            let analysis = pipeline.run(&data).await?;

            let doctors = match postal_code {
                Some(code) => doctor_locator(config).find_by_postal_code(&code).await?,
                None => None,
            };

            let html = report::render_analysis_report(&analysis, doctors.as_ref());
            std::fs::write(&output, html)?;

            match analysis.outcome {
                AnalysisOutcome::NoTextDetected => {
                    Ok(format!("No text detected; report saved to {}", output))
                }
                AnalysisOutcome::Analyzed { .. } => {
                    Ok(format!("Analysis complete; report saved to {}", output))
                }
            }
        }

        Command::Diagnose {
            name,
            age,
            symptoms,
            allergies,
            history,
            postal_code,
            output,
        } => {
            let form = DiagnosisForm {
                name,
                age,
                symptoms,
                allergies,
                history,
            };

            let pipeline = analysis_pipeline(config, PreprocessOptions::default());
            let assessment = pipeline.diagnose(&form).await?;

            let doctors = match postal_code {
                Some(code) => doctor_locator(config).find_by_postal_code(&code).await?,
                None => None,
            };

            let html = report::render_diagnosis_report(&form, &assessment, doctors.as_ref(), Utc::now());
            std::fs::write(&output, html)?;

            Ok(format!("Assessment complete; report saved to {}", output))
        }

        Command::Doctors {
            postal_code,
            use_ip,
        } => {
            let locator = doctor_locator(config);
            let search = if use_ip {
                locator.find_by_caller_ip().await?
            } else if let Some(code) = postal_code {
                locator.find_by_postal_code(&code).await?
            } else {
                return Err(rxlens::RxError::ValidationError {
                    field: "postal_code".to_string(),
                    message: "provide --postal-code or --use-ip".to_string(),
                });
            };

            match search {
                Some(search) => {
                    for doctor in &search.listings {
                        let rating = doctor
                            .rating
                            .map(|r| format!("{:.1}", r))
                            .unwrap_or_else(|| "unrated".to_string());
                        println!(
                            "🏥 {} - {} (rating: {})",
                            doctor.name, doctor.address, rating
                        );
                    }
                    Ok(format!(
                        "Found {} doctors near {:.4},{:.4}",
                        search.listings.len(),
                        search.center.lat,
                        search.center.lng
                    ))
                }
                None => Ok("Could not resolve a location; no search performed".to_string()),
            }
        }
    }
}

fn analysis_pipeline(
    config: &ServicesConfig,
    options: PreprocessOptions,
) -> AnalysisPipeline<HttpOcrClient, HttpCompletionClient> {
    let ocr = HttpOcrClient::new(config.ocr.endpoint.clone(), config.ocr.api_key.clone());
    let reasoning = HttpCompletionClient::new(
        config.reasoning.endpoint.clone(),
        config.reasoning.api_key.clone(),
        config.reasoning.model.clone(),
    );
    AnalysisPipeline::new(ocr, reasoning, options)
}

fn doctor_locator(config: &ServicesConfig) -> DoctorLocator<HttpGeocodeClient, HttpPlacesClient> {
    let geocode = HttpGeocodeClient::new(
        config.geocoding.endpoint.clone(),
        config.geocoding.api_key.clone(),
        config.ip_location.endpoint.clone(),
    );
    let places = HttpPlacesClient::new(
        config.places.endpoint.clone(),
        config.places.api_key.clone(),
    );
    DoctorLocator::new(
        geocode,
        places,
        config.radius_meters(),
        config.category().to_string(),
    )
}
