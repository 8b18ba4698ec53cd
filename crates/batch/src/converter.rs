// standard library
use std::fs;
use std::path::{Path, PathBuf};

// pxtools modules
use pxtools_format::{error_chain, f, pluralise};
use pxtools_pxr::PxrDecoder;
use pxtools_vti::VolumeToVti;

// crate modules
use crate::decoder::FieldDecoder;
use crate::error::{Error, JobError, Result};
use crate::job::{ConversionJob, ConversionSummary, JobReport, LabelMode};
use crate::selector::FieldSelector;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, error, info, warn};

/// File extension of the image data outputs, without the dot
pub const VTI_EXTENSION: &str = "vti";

/// Convert every field dump matching `selector` with the default settings
///
/// Shorthand for [BatchConverter::run()] with the .pxr decoder, legacy
/// labels and extents, and the progress bar enabled.
///
/// ```rust, no_run
/// # use pxtools_batch::convert_fields;
/// let summary = convert_fields("all", "./RESULTS", "./vti_data").unwrap();
/// assert!(summary.is_success());
/// ```
pub fn convert_fields<P, Q>(selector: &str, source_dir: P, output_dir: Q) -> Result<ConversionSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    BatchConverter::new().run(selector, source_dir, output_dir)
}

/// Discovers field dumps and converts each one to image data
///
/// A run proceeds in stages:
/// - Find candidate files in the source directory matching the selector
/// - Stop with [Error::NoMatch] if there are none
/// - Stop after listing them for the `show` selector
/// - Create the output directory if needed
/// - Decode and write each candidate in turn
///
/// Nothing touches the output directory until at least one candidate has
/// been found, so a typo in the selector leaves the filesystem untouched.
///
/// ```rust, no_run
/// # use pxtools_batch::{BatchConverter, LabelMode};
/// # use pxtools_vti::VolumeToVti;
/// // Initialise the converter and set some options
/// let mut converter = BatchConverter::new();
/// converter.disable_progress();
/// converter.set_label_mode(LabelMode::PerFile);
/// converter.set_encoder(VolumeToVti::builder().atomic(true).build());
///
/// let summary = converter.run("all", "./RESULTS", "./vti_data").unwrap();
/// println!("{summary}");
/// ```
#[derive(Debug)]
pub struct BatchConverter<D: FieldDecoder = PxrDecoder> {
    /// Reads the source files
    decoder: D,
    /// Writes the output files
    encoder: VolumeToVti,
    /// Data array naming
    label_mode: LabelMode,
    /// Abort on the first failed job?
    fail_fast: bool,
    /// Disable progress bar?
    disable_progress: bool,
}

impl Default for BatchConverter<PxrDecoder> {
    fn default() -> Self {
        Self::with_decoder(PxrDecoder)
    }
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl BatchConverter<PxrDecoder> {
    /// Converter for .pxr dumps with default settings
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: FieldDecoder> BatchConverter<D> {
    /// Converter for any other dump format
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder,
            encoder: VolumeToVti::default(),
            label_mode: LabelMode::default(),
            fail_fast: false,
            disable_progress: false,
        }
    }

    /// Configuration used to write every output file
    pub fn set_encoder(&mut self, encoder: VolumeToVti) {
        self.encoder = encoder;
    }

    /// Choose between the shared selector label and per-file labels
    pub fn set_label_mode(&mut self, mode: LabelMode) {
        self.label_mode = mode;
    }

    /// Stop at the first failed job instead of carrying on
    pub fn set_fail_fast(&mut self, fail_fast: bool) {
        self.fail_fast = fail_fast;
    }

    /// Do not print the tqdm progress indicators
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Run the batch for the operator's selector string
    pub fn run<P, Q>(&self, selector: &str, source_dir: P, output_dir: Q) -> Result<ConversionSummary>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let selector = selector.parse::<FieldSelector>()?;
        self.run_selector(selector, source_dir.as_ref(), output_dir.as_ref())
    }

    /// Run the batch for an already parsed selector
    pub fn run_selector(
        &self,
        selector: FieldSelector,
        source_dir: &Path,
        output_dir: &Path,
    ) -> Result<ConversionSummary> {
        let candidates = self.candidates(&selector, source_dir)?;

        if candidates.is_empty() {
            return Err(Error::NoMatch {
                selector: selector.to_string(),
                extension: self.decoder.extension().to_string(),
                directory: source_dir.to_path_buf(),
            });
        }

        info!("Found {}", pluralise(candidates.len(), "field"));
        for path in &candidates {
            info!("  {}", path.display());
        }

        if selector.is_dry_run() {
            return Ok(ConversionSummary {
                selector,
                candidates,
                reports: Vec::new(),
            });
        }

        ensure_directory(output_dir)?;

        let jobs = candidates
            .iter()
            .map(|source| self.job(&selector, source, output_dir))
            .collect::<Vec<ConversionJob>>();

        let reports = self.convert_all(jobs)?;

        Ok(ConversionSummary {
            selector,
            candidates,
            reports,
        })
    }

    /// Source files matching the selector, in directory listing order
    ///
    /// Only regular files with the decoder's extension are considered, and
    /// hidden files are skipped. The selector is matched against the file
    /// stem.
    pub fn candidates(&self, selector: &FieldSelector, source_dir: &Path) -> Result<Vec<PathBuf>> {
        let source_error = |source: std::io::Error| Error::SourceDirectory {
            path: source_dir.to_path_buf(),
            source,
        };

        let mut candidates = Vec::new();
        for entry in fs::read_dir(source_dir).map_err(source_error)? {
            let path = entry.map_err(source_error)?.path();

            if !path.is_file() || !self.has_extension(&path) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping non UTF-8 file name {}", path.display());
                continue;
            };

            if !stem.starts_with('.') && selector.matches(stem) {
                candidates.push(path);
            }
        }

        Ok(candidates)
    }

    /// Pair a source file with its output path and label
    pub fn job(&self, selector: &FieldSelector, source: &Path, output_dir: &Path) -> ConversionJob {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let label = match self.label_mode {
            LabelMode::Shared => selector.to_string(),
            LabelMode::PerFile => stem.clone(),
        };

        ConversionJob {
            source: source.to_path_buf(),
            output: output_dir.join(f!("{stem}.{VTI_EXTENSION}")),
            label,
        }
    }

    /// Decode and write a single job
    pub fn convert(&self, job: &ConversionJob) -> std::result::Result<(), JobError> {
        debug!("Converting {} -> {}", job.source.display(), job.output.display());

        let volume = self
            .decoder
            .decode(&job.source)
            .map_err(|e| JobError::Decode(Box::new(e)))?;

        self.encoder.write(&volume, &job.label, &job.output)?;
        Ok(())
    }
}

impl<D: FieldDecoder> BatchConverter<D> {
    /// Primary run loop over every job
    fn convert_all(&self, jobs: Vec<ConversionJob>) -> Result<Vec<JobReport>> {
        let mut progress_bar = self.init_progress_bar(jobs.len())?;
        if !self.disable_progress {
            progress_bar.refresh()?;
        }

        let mut reports = Vec::with_capacity(jobs.len());
        for job in jobs {
            let outcome = match self.convert(&job) {
                Err(source) if self.fail_fast => {
                    self.end_progress_line();
                    return Err(Error::JobFailed {
                        path: job.source,
                        source,
                    });
                }
                Err(e) => {
                    error!("Failed to convert {}: {}", job.source.display(), error_chain(&e));
                    Err(e)
                }
                Ok(()) => Ok(()),
            };

            reports.push(JobReport { job, outcome });
            progress_bar.update(1)?;
        }

        self.end_progress_line();
        Ok(reports)
    }

    /// Need an extra line for clean spacing if the progress bar is printed
    fn end_progress_line(&self) {
        if !self.disable_progress {
            eprintln!()
        }
    }

    /// Whether a path carries the decoder's extension
    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.decoder.extension())
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        BarBuilder::default()
            .total(total)
            .unit(" fields")
            .disable(self.disable_progress)
            .bar_format("{count}/{total} fields [{elapsed}]   ")
            .build()
            .map_err(Error::ProgressBar)
    }
}

/// Create the output directory, fine if it already exists
fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        info!("Creating directory for vti files: {}", path.display());
    }

    fs::create_dir_all(path).map_err(|source| Error::OutputDirectory {
        path: path.to_path_buf(),
        source,
    })
}
