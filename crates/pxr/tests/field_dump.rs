//! Integration tests for reading and writing .pxr dumps

use std::path::{Path, PathBuf};

use pxtools_pxr::{read_pxr_file, write_pxr_file, Axis, Error, Header, PxrField};
use pxtools_volume::ScalarVolume;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Raw dump bytes with the values laid out `ix` fastest
fn dump_bytes(axes: [(f64, f64, i32); 3], values: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (min, max, n) in axes {
        bytes.extend_from_slice(&min.to_le_bytes());
        bytes.extend_from_slice(&max.to_le_bytes());
        bytes.extend_from_slice(&n.to_le_bytes());
    }
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

fn write_dump(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[rstest]
fn read_reorders_values(scratch: TempDir) {
    // nx=2, ny=1, nz=3 with value = 10*ix + iz, ix fastest on disk
    let values = [0.0, 10.0, 1.0, 11.0, 2.0, 12.0];
    let bytes = dump_bytes([(0.0, 2.0, 2), (0.0, 1.0, 1), (-1.5, 1.5, 3)], &values);
    let path = write_dump(scratch.path(), "ex.pxr", &bytes);

    let field = read_pxr_file(&path).unwrap();

    assert_eq!(field.header.z, Axis::new(-1.5, 1.5, 3));
    assert_eq!(field.header.spacing(), [1.0, 1.0, 1.0]);
    assert_eq!(
        field.volume.values(),
        &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]
    );
}

#[rstest]
fn empty_field(scratch: TempDir) {
    let bytes = dump_bytes([(0.0, 1.0, 0), (0.0, 1.0, 4), (0.0, 1.0, 4)], &[]);
    let path = write_dump(scratch.path(), "empty.pxr", &bytes);

    let volume = read_pxr_file(&path).unwrap().volume;
    assert!(volume.is_empty());
    assert_eq!(volume.extents().ny, 4);
}

#[rstest]
#[case(3)] // short by one value
#[case(5)] // one value too many
fn wrong_value_count(scratch: TempDir, #[case] count: usize) {
    let values = vec![1.0; count];
    let bytes = dump_bytes([(0.0, 1.0, 2), (0.0, 1.0, 2), (0.0, 1.0, 1)], &values);
    let path = write_dump(scratch.path(), "bad.pxr", &bytes);

    match read_pxr_file(&path) {
        Err(Error::UnexpectedByteLength { expected, found }) => {
            assert_eq!(expected, 32);
            assert_eq!(found, count * 8);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
fn header_claiming_huge_grid(scratch: TempDir) {
    let n = 1_000_000;
    let bytes = dump_bytes([(0.0, 1.0, n), (0.0, 1.0, n), (0.0, 1.0, n)], &[1.0]);
    let path = write_dump(scratch.path(), "huge.pxr", &bytes);

    assert!(matches!(
        read_pxr_file(&path),
        Err(Error::UnexpectedByteLength { found: 8, .. })
    ));
}

#[rstest]
fn negative_extent(scratch: TempDir) {
    let bytes = dump_bytes([(0.0, 1.0, 2), (0.0, 1.0, 2), (0.0, 1.0, -1)], &[]);
    let path = write_dump(scratch.path(), "neg.pxr", &bytes);

    assert!(matches!(
        read_pxr_file(&path),
        Err(Error::NegativeExtent { axis: 'z', value: -1 })
    ));
}

#[rstest]
fn truncated_header(scratch: TempDir) {
    let path = write_dump(scratch.path(), "short.pxr", &[0u8; 20]);
    assert!(matches!(read_pxr_file(&path), Err(Error::IOError(_))));
}

#[test]
fn missing_file() {
    assert!(matches!(
        read_pxr_file("/nonexistent/field.pxr"),
        Err(Error::IOError(_))
    ));
}

#[rstest]
fn write_then_read(scratch: TempDir) {
    let field = PxrField {
        header: Header {
            x: Axis::new(0.0, 3.0e-6, 0),
            y: Axis::new(0.0, 2.0e-6, 0),
            z: Axis::new(-1.0e-6, 1.0e-6, 0),
        },
        volume: ScalarVolume::from_fn(3, 2, 4, |ix, iy, iz| (ix as f32) - 0.25 * (iy * iz) as f32).unwrap(),
    };
    let path = scratch.path().join("rho.pxr");

    write_pxr_file(&field, &path).unwrap();
    let read = read_pxr_file(&path).unwrap();

    // header extents are refreshed from the volume
    assert_eq!(read.header.x.n, 3);
    assert_eq!(read.header.z.n, 4);
    assert_eq!(read.header.z.min, -1.0e-6);
    assert_eq!(read.volume, field.volume);
}
