use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use scopemate::store::{JobAnalysisMap, JobAnalysisStore};
use scopemate::{Error, FOOTER_ENV, RenderConfig};

#[derive(Parser)]
#[command(name = "scopemate", version, about = "Cover letter PDFs and job analysis bookkeeping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a plain text file to a paginated PDF with a footer image
    Render {
        /// Plain text input
        input: PathBuf,
        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,
        /// Footer image (JPEG or PNG) drawn on every page
        #[arg(long, env = FOOTER_ENV)]
        footer: PathBuf,
        #[arg(long, default_value_t = 50.0)]
        margin: f32,
        #[arg(long, default_value_t = 12.0)]
        font_size: f32,
    },
    /// List stored job analyses
    Jobs {
        #[arg(long, default_value = "data/job_analysis.json")]
        store: PathBuf,
    },
    /// Merge a JSON map of job analyses into the store
    Record {
        #[arg(long, default_value = "data/job_analysis.json")]
        store: PathBuf,
        /// JSON file mapping job id to analysis entry
        entries: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Render {
            input,
            output,
            footer,
            margin,
            font_size,
        } => {
            let text = std::fs::read_to_string(&input)?;
            let footer_bytes = scopemate::read_footer(&footer)?;
            let config = RenderConfig::default()
                .with_margin(margin)
                .with_font_size(font_size);
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            scopemate::render_document_with(&text, &footer_bytes, &output, &config)?;
            println!("{}", output.display());
        }
        Command::Jobs { store } => {
            let store = JobAnalysisStore::load(store)?;
            for (job_id, entry) in store.iter() {
                println!(
                    "{job_id}\t{}\t{}\tdev={}\tfit={}\t{}",
                    entry.job_title, entry.company_name, entry.is_dev, entry.is_fit, entry.reason
                );
            }
            log::info!("{} job analyses in {}", store.len(), store.path().display());
        }
        Command::Record { store, entries } => {
            let raw = std::fs::read_to_string(&entries)?;
            let map: JobAnalysisMap =
                serde_json::from_str(&raw).map_err(|source| Error::Store {
                    path: entries.clone(),
                    source,
                })?;
            let mut store = JobAnalysisStore::load(store)?;
            let n = store.merge(map);
            store.persist()?;
            log::info!("Merged {n} job analyses into {}", store.path().display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
