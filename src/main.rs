use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use fleet_report::app::App;
use fleet_report::client::ReportClient;
use fleet_report::export::DEFAULT_EXPORT_FILE;
use fleet_report::form::ReportForm;
use fleet_report::model::{CompanyInfo, InputData, NarrativeSection};

/// Generates weekly DOT fleet compliance snapshot PDFs.
///
/// Fonts must be present under `assets/fonts` or provided via the
/// `FLEET_REPORT_FONTS_DIR` environment variable before exporting.
#[derive(Parser)]
#[command(author, version, about = "DOT fleet compliance snapshot generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request narrative sections for a payload file and export the PDF.
    #[command(name = "generate")]
    Generate {
        /// Payload file holding `{companyInfo, inputData}`.
        #[arg(long)]
        input: PathBuf,
        /// Generation endpoint URL (falls back to `FLEET_REPORT_ENDPOINT`,
        /// then the compiled-in default).
        #[arg(long)]
        endpoint: Option<String>,
        /// Output PDF path.
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },

    /// Export the PDF from a payload file and previously saved sections.
    #[command(name = "render", aliases = ["offline"])]
    Render {
        /// Payload file holding `{companyInfo, inputData}`.
        #[arg(long)]
        input: PathBuf,
        /// Sections file holding `{sections: [{title, markdown}, ...]}`.
        #[arg(long)]
        sections: PathBuf,
        /// Output PDF path.
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },

    /// Write a zeroed starter payload file.
    #[command(name = "sample")]
    Sample {
        /// Where to write the payload template.
        #[arg(long, default_value = "payload.json")]
        output: PathBuf,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    company_info: CompanyInfo,
    input_data: InputData,
}

#[derive(Deserialize)]
struct SectionsFile {
    sections: Vec<NarrativeSection>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            endpoint,
            output,
        } => generate(&input, endpoint, &output),
        Commands::Render {
            input,
            sections,
            output,
        } => render_offline(&input, &sections, &output),
        Commands::Sample { output } => write_sample(&output),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn load_payload(path: &PathBuf) -> Result<Payload, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let payload: Payload = serde_json::from_str(&raw)?;
    Ok(payload)
}

fn generate(
    input: &PathBuf,
    endpoint: Option<String>,
    output: &PathBuf,
) -> Result<(), Box<dyn Error>> {
    let payload = load_payload(input)?;
    let client = match endpoint {
        Some(url) => ReportClient::new(url),
        None => ReportClient::from_env(),
    };

    let mut app = App::with_form(ReportForm::from_parts(
        payload.company_info,
        payload.input_data,
    ));
    app.submit(&client)?;

    match app.export_report(Some(output))? {
        Some(path) => println!("Exported {}", path.display()),
        None => println!("No report to export"),
    }
    Ok(())
}

fn render_offline(
    input: &PathBuf,
    sections: &PathBuf,
    output: &PathBuf,
) -> Result<(), Box<dyn Error>> {
    let payload = load_payload(input)?;
    let raw = std::fs::read_to_string(sections)?;
    let sections: SectionsFile = serde_json::from_str(&raw)?;

    let mut app = App::with_form(ReportForm::from_parts(
        payload.company_info,
        payload.input_data,
    ));
    app.install(sections.sections);

    match app.export_report(Some(output))? {
        Some(path) => println!("Exported {}", path.display()),
        None => println!("No report to export"),
    }
    Ok(())
}

fn write_sample(output: &PathBuf) -> Result<(), Box<dyn Error>> {
    let payload = Payload {
        company_info: CompanyInfo::default(),
        input_data: InputData::default(),
    };
    std::fs::write(output, serde_json::to_string_pretty(&payload)?)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
