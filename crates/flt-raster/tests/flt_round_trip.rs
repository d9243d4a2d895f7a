//! Reading and writing `.hdr` / `.flt` pairs on disk.

use flt_raster::{
    read_ascii_grid, read_flt, read_grid, read_header, write_flt, ByteOrder, RasterError,
    RasterGrid, RasterHeader,
};
use test_utils::{
    create_grid_with_nodata, create_ridge_grid, create_test_grid, flt_payload, grid, headers,
    temp_test_dir,
};

#[test]
fn test_write_then_read_is_bit_identical() {
    let dir = temp_test_dir();
    let path = dir.path().join("OR_Clip_HS.flt");

    let spec = grid::LIDAR_CLIP;
    let header = RasterHeader::new(
        spec.ncols,
        spec.nrows,
        spec.xllcorner + 0.5,
        spec.yllcorner,
        spec.cellsize,
        -9999.0,
    );
    let mut values = create_ridge_grid(spec.ncols, spec.nrows, 1500.0, 120.0);
    values[0] = -9999.0;
    values[1] = f32::NAN;
    values[2] = -0.0;
    values[3] = f32::MIN_POSITIVE / 4.0;
    let original = RasterGrid::new(header, values).unwrap();

    write_flt(&path, &original).unwrap();
    let loaded = read_flt(dir.path().join("OR_Clip_HS.hdr")).unwrap();

    assert_eq!(loaded.header(), original.header());
    assert_eq!(loaded.data().len(), spec.size());
    for (a, b) in original.data().iter().zip(loaded.data()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_read_hand_written_pair() {
    let dir = temp_test_dir();
    let hdr = dir.path().join("dem.hdr");
    let flt = dir.path().join("dem.flt");
    std::fs::write(&hdr, headers::SMALL_LSB).unwrap();
    std::fs::write(&flt, flt_payload(&create_test_grid(4, 3))).unwrap();

    let header = read_header(&hdr).unwrap();
    assert_eq!(header.ncols, 4);
    assert_eq!(header.nrows, 3);
    assert_eq!(header.byte_order, ByteOrder::LsbFirst);

    let dem = read_grid(&flt, &header).unwrap();
    assert_eq!(dem.nrows(), 3);
    assert_eq!(dem.ncols(), 4);
    // top row first
    assert_eq!(dem.row(0).unwrap(), &[0.0, 1000.0, 2000.0, 3000.0]);
    assert_eq!(dem.get(2, 3), Some(3002.0));
    assert_eq!(dem.pixel_to_utm(3.0, 0.0), (441000.0, 4120000.0));
}

#[test]
fn test_nodata_cells_stay_in_place() {
    let dir = temp_test_dir();
    let path = dir.path().join("masked.flt");
    let header = RasterHeader::new(4, 3, 0.0, 0.0, 1.0, -9999.0);
    let values = create_grid_with_nodata(4, 3, -9999.0, 5);
    write_flt(&path, &RasterGrid::new(header, values).unwrap()).unwrap();

    let loaded = read_flt(&path).unwrap();
    assert_eq!(loaded.data().len(), 12);
    assert_eq!(loaded.raw(0, 0), Some(-9999.0));
    assert_eq!(loaded.get(0, 0), None);
    assert_eq!(loaded.get(1, 1), None);
    assert_eq!(loaded.valid_count(), 9);
    assert_eq!(loaded.value_range(), Some((1.0, 3002.0)));
}

#[test]
fn test_truncated_payload_is_shape_error() {
    let dir = temp_test_dir();
    std::fs::write(dir.path().join("cut.hdr"), headers::SMALL_LSB).unwrap();
    let mut payload = flt_payload(&create_test_grid(4, 3));
    payload.truncate(payload.len() - 2);
    std::fs::write(dir.path().join("cut.flt"), payload).unwrap();

    match read_flt(dir.path().join("cut.flt")) {
        Err(RasterError::Shape {
            expected_cells,
            actual_bytes,
        }) => {
            assert_eq!(expected_cells, 12);
            assert_eq!(actual_bytes, 46);
        }
        other => panic!("expected shape error, got {:?}", other),
    }
}

#[test]
fn test_unaddressable_dimensions_are_rejected() {
    let dir = temp_test_dir();
    let hdr = headers::SMALL_LSB
        .replace("ncols 4", "ncols 4294967296")
        .replace("nrows 3", "nrows 4294967296");
    std::fs::write(dir.path().join("huge.hdr"), hdr).unwrap();
    std::fs::write(dir.path().join("huge.flt"), b"").unwrap();

    assert!(matches!(
        read_flt(dir.path().join("huge.flt")),
        Err(RasterError::Format { line: 2, .. })
    ));
}

#[test]
fn test_big_endian_pair() {
    let dir = temp_test_dir();
    std::fs::write(dir.path().join("be.hdr"), headers::SMALL_MSB).unwrap();
    let payload: Vec<u8> = [1.5_f32, -2.0, 3.25, 4.0]
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    std::fs::write(dir.path().join("be.flt"), payload).unwrap();

    let loaded = read_flt(dir.path().join("be.flt")).unwrap();
    assert_eq!(loaded.data(), &[1.5, -2.0, 3.25, 4.0]);
}

#[test]
fn test_bad_header_is_format_error() {
    let dir = temp_test_dir();
    std::fs::write(dir.path().join("bad.hdr"), headers::BAD_CELLSIZE).unwrap();
    std::fs::write(dir.path().join("bad.flt"), flt_payload(&create_test_grid(4, 3))).unwrap();

    assert!(matches!(
        read_flt(dir.path().join("bad.hdr")),
        Err(RasterError::Format { line: 5, .. })
    ));
}

#[test]
fn test_missing_payload_is_io_error() {
    let dir = temp_test_dir();
    std::fs::write(dir.path().join("lonely.hdr"), headers::SMALL_LSB).unwrap();
    assert!(matches!(
        read_flt(dir.path().join("lonely.hdr")),
        Err(RasterError::Io(_))
    ));
}

#[test]
fn test_other_extension_is_rejected() {
    assert!(matches!(
        read_flt("hillshade.tif"),
        Err(RasterError::InvalidPath(_))
    ));
}

#[test]
fn test_ascii_grid_from_disk() {
    let dir = temp_test_dir();
    let path = dir.path().join("dem.asc");
    std::fs::write(&path, headers::ASCII_3X2).unwrap();

    let dem = read_ascii_grid(&path).unwrap();
    assert_eq!(dem.header().cellsize, 2.0);
    assert_eq!(dem.data(), &[1.5, 2.5, -9999.0, 4.0, 5.0, 6.0]);
    assert_eq!(dem.get(0, 2), None);
    assert_eq!(dem.value_range(), Some((1.5, 6.0)));
}
