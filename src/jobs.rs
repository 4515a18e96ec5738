//! Typed job records and the decision of whether a posting gets a cover letter.
//!
//! Scraping postings and talking to the language model live outside this
//! crate; they are reached through [`FitClassifier`] and [`CoverLetterWriter`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::error::Error;
use crate::model::FooterImage;

/// Application procedure text of postings handled through the co-op portal.
pub const COOP_PROCEDURE: &str = "Through UBC Science Co-op";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    pub application_procedure: String,
    pub full_job_description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplicationRoute {
    ThroughCoop,
    External,
}

impl ApplicationRoute {
    pub fn from_procedure(procedure: &str) -> Self {
        if procedure == COOP_PROCEDURE {
            ApplicationRoute::ThroughCoop
        } else {
            ApplicationRoute::External
        }
    }
}

/// Classifier answer for one posting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitVerdict {
    pub is_dev: bool,
    pub is_fit: bool,
    #[serde(default)]
    pub reason: String,
}

/// One record of the job analysis store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysisEntry {
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub application_procedure: String,
    pub is_dev: bool,
    pub is_fit: bool,
    pub reason: String,
}

impl JobAnalysisEntry {
    pub fn new(details: &JobDetails, verdict: &FitVerdict) -> Self {
        JobAnalysisEntry {
            job_title: details.job_title.clone(),
            company_name: details.company_name.clone(),
            application_procedure: details.application_procedure.clone(),
            is_dev: verdict.is_dev,
            is_fit: verdict.is_fit,
            reason: verdict.reason.clone(),
        }
    }

    pub fn verdict(&self) -> FitVerdict {
        FitVerdict {
            is_dev: self.is_dev,
            is_fit: self.is_fit,
            reason: self.reason.clone(),
        }
    }
}

/// Co-op postings only need one positive signal; external ones need both.
pub fn wants_cover_letter(route: ApplicationRoute, verdict: &FitVerdict) -> bool {
    match route {
        ApplicationRoute::ThroughCoop => verdict.is_dev || verdict.is_fit,
        ApplicationRoute::External => verdict.is_dev && verdict.is_fit,
    }
}

/// Lowercased title with every non-alphanumeric ASCII char replaced by `_`.
pub fn safe_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// What gets uploaded for a co-op application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobPackage {
    pub job_id: String,
    pub cover_letter_path: PathBuf,
}

impl JobPackage {
    pub fn document_name(&self) -> String {
        format!("{}_CoverLetter", self.job_id)
    }

    pub fn package_name(&self) -> String {
        format!("{}_Package", self.job_id)
    }
}

/// Decides whether a posting is a developer role and whether it fits.
pub trait FitClassifier {
    fn classify(&self, title: &str, description: &str) -> Result<FitVerdict, Error>;
}

/// Produces cover letter text tailored to a company and posting.
pub trait CoverLetterWriter {
    fn write(&self, company: &str, description: &str) -> Result<String, Error>;
}

/// Render the posting and its cover letter when the policy asks for one.
///
/// Writes `<out_root>/job_descriptions/<name>.pdf` and
/// `<out_root>/cover_letters/<name>.pdf`. Returns `None` when the posting is
/// skipped.
pub fn prepare_documents(
    details: &JobDetails,
    verdict: &FitVerdict,
    writer: &impl CoverLetterWriter,
    out_root: &Path,
    footer: &FooterImage,
    config: &RenderConfig,
) -> Result<Option<JobPackage>, Error> {
    let route = ApplicationRoute::from_procedure(&details.application_procedure);
    if !wants_cover_letter(route, verdict) {
        log::info!(
            "Skipping cover letter for: {} (not dev or not a fit)",
            details.job_title
        );
        return Ok(None);
    }

    let name = format!("{}.pdf", safe_filename(&details.job_title));

    let description_dir = out_root.join("job_descriptions");
    std::fs::create_dir_all(&description_dir)?;
    let bytes = crate::pdf::render(&details.full_job_description, footer, config)?;
    std::fs::write(description_dir.join(&name), bytes)?;

    let letter = writer.write(&details.company_name, &details.full_job_description)?;
    let letters_dir = out_root.join("cover_letters");
    std::fs::create_dir_all(&letters_dir)?;
    let cover_letter_path = letters_dir.join(&name);
    let bytes = crate::pdf::render(&letter, footer, config)?;
    std::fs::write(&cover_letter_path, bytes)?;
    log::info!("Cover letter generated for: {}", details.job_title);

    Ok(Some(JobPackage {
        job_id: details.job_id.clone(),
        cover_letter_path,
    }))
}

/// Classify a posting and record the verdict in `store`.
///
/// Postings already in the store keep their stored verdict and the classifier
/// is not consulted.
pub fn screen_posting(
    details: &JobDetails,
    classifier: &impl FitClassifier,
    store: &mut crate::store::JobAnalysisStore,
) -> Result<FitVerdict, Error> {
    if let Some(entry) = store.get(&details.job_id) {
        log::info!("Skipping already analysed job: {}", details.job_id);
        return Ok(entry.verdict());
    }
    let verdict = classifier.classify(&details.job_title, &details.full_job_description)?;
    store.record(&details.job_id, JobAnalysisEntry::new(details, &verdict));
    Ok(verdict)
}
