pub mod analysis;
pub mod locator;
pub mod normalize;
pub mod preprocess;
pub mod prompt;
pub mod report;

pub use crate::domain::model::{
    AnalysisOutcome, AnalysisReport, Coordinates, DiagnosisForm, DoctorListing, DoctorSearch,
    ImageData, PreparedImage,
};
pub use crate::domain::ports::{GeocodeProvider, OcrProvider, PlacesProvider, ReasoningProvider};
pub use crate::utils::error::Result;
