//! Integration tests for discovery and batch conversion

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pxtools_batch::{BatchConverter, Error, FieldDecoder, JobError, LabelMode};
use pxtools_pxr::{write_pxr_file, Axis, Header, PxrField};
use pxtools_volume::{Extents, ScalarVolume};
use pxtools_vti::{read_vti, ExtentMode, VolumeToVti};
use rstest::{fixture, rstest};
use tempfile::TempDir;

/// Scratch area with a RESULTS directory of dumps and a sibling output path
struct Workspace {
    _root: TempDir,
    source: PathBuf,
    output: PathBuf,
}

fn field(seed: f32) -> PxrField {
    PxrField {
        header: Header {
            x: Axis::new(0.0, 1.0, 0),
            y: Axis::new(0.0, 1.0, 0),
            z: Axis::new(0.0, 1.0, 0),
        },
        volume: ScalarVolume::from_fn(2, 3, 4, |ix, iy, iz| seed + (ix * 12 + iy * 4 + iz) as f32).unwrap(),
    }
}

#[fixture]
fn workspace() -> Workspace {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("RESULTS");
    let output = root.path().join("vti_data");
    std::fs::create_dir(&source).unwrap();

    for (i, name) in ["ex", "ey", "rho_electrons", "rho_ions"].iter().enumerate() {
        write_pxr_file(&field(i as f32 * 100.0), source.join(format!("{name}.pxr"))).unwrap();
    }

    // never candidates
    std::fs::write(source.join("notes.txt"), "ex ey").unwrap();
    std::fs::write(source.join(".hidden.pxr"), [0u8; 4]).unwrap();
    std::fs::create_dir(source.join("dir.pxr")).unwrap();

    Workspace {
        _root: root,
        source,
        output,
    }
}

fn quiet() -> BatchConverter {
    let mut converter = BatchConverter::new();
    converter.disable_progress();
    converter
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[rstest]
fn all_converts_every_dump(workspace: Workspace) {
    let summary = quiet().run("all", &workspace.source, &workspace.output).unwrap();

    assert_eq!(summary.candidates.len(), 4);
    assert_eq!(summary.succeeded(), 4);
    assert!(summary.is_success());
    assert_eq!(
        file_names(&workspace.output),
        set(&["ex.vti", "ey.vti", "rho_electrons.vti", "rho_ions.vti"])
    );
}

#[rstest]
fn outputs_hold_the_decoded_field(workspace: Workspace) {
    quiet().run("ey", &workspace.source, &workspace.output).unwrap();

    let image = read_vti(workspace.output.join("ey.vti")).unwrap();
    assert_eq!(image.label, "ey");
    assert_eq!(image.whole_extent, [0, 2, 0, 3, 0, 4]);
    assert_eq!(image.into_volume(ExtentMode::Legacy).unwrap(), field(100.0).volume);
}

#[rstest]
#[case("rho", &["rho_electrons.vti", "rho_ions.vti"])]
#[case("ions", &["rho_ions.vti"])]
#[case("e", &["ex.vti", "ey.vti", "rho_electrons.vti"])]
fn pattern_matches_substring(workspace: Workspace, #[case] selector: &str, #[case] expected: &[&str]) {
    let summary = quiet().run(selector, &workspace.source, &workspace.output).unwrap();

    assert_eq!(summary.succeeded(), expected.len());
    assert_eq!(file_names(&workspace.output), set(expected));
}

#[rstest]
fn shared_label_is_the_selector(workspace: Workspace) {
    quiet().run("rho", &workspace.source, &workspace.output).unwrap();

    for name in ["rho_electrons.vti", "rho_ions.vti"] {
        assert_eq!(read_vti(workspace.output.join(name)).unwrap().label, "rho");
    }
}

#[rstest]
fn per_file_label_is_the_stem(workspace: Workspace) {
    let mut converter = quiet();
    converter.set_label_mode(LabelMode::PerFile);
    converter.run("all", &workspace.source, &workspace.output).unwrap();

    assert_eq!(read_vti(workspace.output.join("ex.vti")).unwrap().label, "ex");
    assert_eq!(
        read_vti(workspace.output.join("rho_ions.vti")).unwrap().label,
        "rho_ions"
    );
}

#[rstest]
fn show_writes_nothing(workspace: Workspace) {
    let summary = quiet().run("show", &workspace.source, &workspace.output).unwrap();

    assert!(summary.is_dry_run());
    assert_eq!(summary.candidates.len(), 4);
    assert!(summary.reports.is_empty());
    assert!(!workspace.output.exists());
}

#[rstest]
#[case("bz")]
#[case("notes")]
#[case("hidden")]
fn no_match_leaves_output_absent(workspace: Workspace, #[case] selector: &str) {
    let result = quiet().run(selector, &workspace.source, &workspace.output);

    assert!(matches!(result, Err(Error::NoMatch { .. })));
    assert!(!workspace.output.exists());
}

#[rstest]
fn empty_selector_is_rejected(workspace: Workspace) {
    let result = quiet().run("", &workspace.source, &workspace.output);
    assert!(matches!(result, Err(Error::EmptySelector)));
    assert!(!workspace.output.exists());
}

#[rstest]
fn missing_source_directory(workspace: Workspace) {
    let result = quiet().run("all", workspace.source.join("missing"), &workspace.output);
    assert!(matches!(result, Err(Error::SourceDirectory { .. })));
}

#[rstest]
fn existing_output_directory_is_fine(workspace: Workspace) {
    std::fs::create_dir(&workspace.output).unwrap();
    std::fs::write(workspace.output.join("keep.txt"), "x").unwrap();

    quiet().run("ex", &workspace.source, &workspace.output).unwrap();
    assert_eq!(file_names(&workspace.output), set(&["ex.vti", "keep.txt"]));
}

#[rstest]
fn rerun_is_byte_identical(workspace: Workspace) {
    quiet().run("all", &workspace.source, &workspace.output).unwrap();
    let first = std::fs::read(workspace.output.join("rho_ions.vti")).unwrap();

    quiet().run("all", &workspace.source, &workspace.output).unwrap();
    let second = std::fs::read(workspace.output.join("rho_ions.vti")).unwrap();

    assert_eq!(first, second);
}

#[rstest]
fn corrupt_dump_does_not_stop_the_batch(workspace: Workspace) {
    std::fs::write(workspace.source.join("ez.pxr"), [1u8; 30]).unwrap();

    let summary = quiet().run("e", &workspace.source, &workspace.output).unwrap();

    assert_eq!(summary.reports.len(), 4);
    assert_eq!(summary.succeeded(), 3);
    assert_eq!(summary.failed(), 1);

    let (job, error) = summary.failures().next().unwrap();
    assert!(job.source.ends_with("ez.pxr"));
    assert!(matches!(error, JobError::Decode(_)));
    assert!(!workspace.output.join("ez.vti").exists());
}

#[rstest]
fn oversized_header_fails_only_its_job(workspace: Workspace) {
    let mut bytes = Vec::new();
    for _ in 0..3 {
        bytes.extend_from_slice(&0.0_f64.to_le_bytes());
        bytes.extend_from_slice(&1.0_f64.to_le_bytes());
        bytes.extend_from_slice(&1_000_000_i32.to_le_bytes());
    }
    bytes.extend_from_slice(&1.0_f64.to_le_bytes());
    std::fs::write(workspace.source.join("ez.pxr"), bytes).unwrap();

    let summary = quiet().run("all", &workspace.source, &workspace.output).unwrap();

    assert_eq!(summary.succeeded(), 4);
    assert_eq!(summary.failed(), 1);

    let (job, error) = summary.failures().next().unwrap();
    assert!(job.source.ends_with("ez.pxr"));
    assert!(matches!(error, JobError::Decode(_)));
}

#[rstest]
fn unwritable_output_fails_only_its_job(workspace: Workspace) {
    // a directory where the output file should go
    std::fs::create_dir_all(workspace.output.join("ex.vti")).unwrap();

    let summary = quiet().run("e", &workspace.source, &workspace.output).unwrap();

    assert_eq!(summary.reports.len(), 3);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);

    let (job, error) = summary.failures().next().unwrap();
    assert!(job.source.ends_with("ex.pxr"));
    assert!(matches!(error, JobError::Encode(_)));
    assert!(workspace.output.join("ey.vti").is_file());
    assert!(workspace.output.join("rho_electrons.vti").is_file());
}

#[rstest]
fn fail_fast_stops_at_first_failure(workspace: Workspace) {
    std::fs::write(workspace.source.join("bad.pxr"), [1u8; 30]).unwrap();

    let mut converter = quiet();
    converter.set_fail_fast(true);

    match converter.run("bad", &workspace.source, &workspace.output) {
        Err(Error::JobFailed { path, source }) => {
            assert!(path.ends_with("bad.pxr"));
            assert!(matches!(source, JobError::Decode(_)));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
fn encoder_settings_reach_every_job(workspace: Workspace) {
    let mut converter = quiet();
    converter.set_encoder(
        VolumeToVti::builder()
            .extent_mode(ExtentMode::Corrected)
            .build(),
    );
    converter.run("ex", &workspace.source, &workspace.output).unwrap();

    let image = read_vti(workspace.output.join("ex.vti")).unwrap();
    assert_eq!(image.whole_extent, [0, 1, 0, 2, 0, 3]);
}

#[rstest]
fn fail_fast_with_progress_bar(workspace: Workspace) {
    std::fs::write(workspace.source.join("bad.pxr"), [1u8; 30]).unwrap();

    let mut converter = BatchConverter::new();
    converter.set_fail_fast(true);

    let result = converter.run("bad", &workspace.source, &workspace.output);
    assert!(matches!(result, Err(Error::JobFailed { .. })));
    assert!(!workspace.output.join("bad.vti").exists());
}

/// Decoder for a trivial text format, one value per line
#[derive(Debug)]
struct LineDecoder;

impl FieldDecoder for LineDecoder {
    type Error = std::io::Error;

    fn extension(&self) -> &str {
        "txt"
    }

    fn decode(&self, path: &Path) -> Result<ScalarVolume, Self::Error> {
        let text = std::fs::read_to_string(path)?;
        let values = text
            .split_whitespace()
            .map(|_| 1.0)
            .collect::<Vec<f32>>();
        let extents = Extents::new(values.len(), 1, 1);
        ScalarVolume::new(extents, values).map_err(std::io::Error::other)
    }
}

#[rstest]
fn custom_decoder(workspace: Workspace) {
    let mut converter = BatchConverter::with_decoder(LineDecoder);
    converter.disable_progress();

    let summary = converter.run("all", &workspace.source, &workspace.output).unwrap();

    assert_eq!(summary.succeeded(), 1);
    let image = read_vti(workspace.output.join("notes.vti")).unwrap();
    assert_eq!(image.values, vec![1.0, 1.0]);
}
