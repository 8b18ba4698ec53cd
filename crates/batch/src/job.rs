// standard library
use std::path::PathBuf;

// pxtools modules
use pxtools_format::{f, pluralise};

// crate modules
use crate::error::JobError;
use crate::selector::FieldSelector;

/// Choice of label embedded as the data array name
///
/// Legacy behaviour names the array in every output after the selector
/// string, so a run with `all` produces files whose arrays are all called
/// "all". [LabelMode::PerFile] names each array after its own source file
/// instead. The default stays with the legacy behaviour until downstream
/// viewer states have been checked against per-file names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// Operator's selector string for every file
    #[default]
    Shared,
    /// Stem of each source file, e.g. "rho" for rho.pxr
    PerFile,
}

/// One source file to convert, and where the result goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Field dump to read
    pub source: PathBuf,
    /// Image data file to write
    pub output: PathBuf,
    /// Name given to the data array in the output
    pub label: String,
}

/// Outcome of a single job
#[derive(Debug)]
pub struct JobReport {
    /// The job that was run
    pub job: ConversionJob,
    /// Success, or why the job failed
    pub outcome: Result<(), JobError>,
}

impl JobReport {
    /// True if the output file was written
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Result of a batch run
///
/// Candidates are listed in the order the directory listing produced them.
/// For the `show` selector there are candidates but no reports.
#[derive(Debug)]
pub struct ConversionSummary {
    /// Selector the run was made with
    pub selector: FieldSelector,
    /// Source files that matched the selector
    pub candidates: Vec<PathBuf>,
    /// One report per converted candidate
    pub reports: Vec<JobReport>,
}

impl ConversionSummary {
    /// Number of files written successfully
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    /// True if no job failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// True if nothing was converted on purpose
    pub fn is_dry_run(&self) -> bool {
        self.selector.is_dry_run()
    }

    /// Failed jobs alongside their errors
    pub fn failures(&self) -> impl Iterator<Item = (&ConversionJob, &JobError)> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (&r.job, e)))
    }
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_dry_run() {
            return write!(
                f,
                "{} available to convert",
                pluralise(self.candidates.len(), "field")
            );
        }

        let mut s = f!(
            "Converted {} of {}",
            self.succeeded(),
            pluralise(self.reports.len(), "field")
        );

        for (job, error) in self.failures() {
            s += &f!("\n  failed: {} ({error})", job.source.display());
        }

        write!(f, "{}", s)
    }
}
