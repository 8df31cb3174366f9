use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rxlens")]
#[command(about = "Prescription image analysis and nearby-doctor lookup")]
pub struct Cli {
    /// Path to the services configuration file
    #[arg(short, long, default_value = "rxlens.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a prescription image and write an HTML report
    Analyze {
        /// Path to the prescription image (png, jpg, jpeg or webp)
        image: String,

        /// Binarization threshold (0-255) applied after grayscale conversion
        #[arg(long)]
        threshold: Option<u8>,

        /// Also look up doctors near this postal code
        #[arg(long)]
        postal_code: Option<String>,

        /// Where to write the HTML report
        #[arg(short, long, default_value = "rxlens-report.html")]
        output: String,
    },

    /// Request an assessment from a symptom form
    Diagnose {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        symptoms: String,

        #[arg(long, default_value = "")]
        allergies: String,

        #[arg(long, default_value = "")]
        history: String,

        /// Also look up doctors near this postal code
        #[arg(long)]
        postal_code: Option<String>,

        /// Where to write the HTML report
        #[arg(short, long, default_value = "rxlens-report.html")]
        output: String,
    },

    /// Find doctors near a postal code or the caller's IP
    Doctors {
        #[arg(long, conflicts_with = "use_ip")]
        postal_code: Option<String>,

        /// Resolve the search center from the caller's IP address
        #[arg(long)]
        use_ip: bool,
    },
}
