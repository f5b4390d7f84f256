use mojibake_core::{
    detect_bom, find_split, Alignment, BomOutcome, ByteOrder, SegmentationFailed, BOM_BE, BOM_LE,
};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

#[test]
fn bom_markers_resolve_byte_order() {
    init_logging();
    assert_eq!(detect_bom(&BOM_LE), BomOutcome::Marker(ByteOrder::Little));
    assert_eq!(detect_bom(&BOM_BE), BomOutcome::Marker(ByteOrder::Big));
    assert_eq!(
        detect_bom(&[0xFF, 0xFE, 0x61, 0x00]),
        BomOutcome::Marker(ByteOrder::Little)
    );
}

#[test]
fn non_marker_heads_are_data() {
    init_logging();
    assert_eq!(detect_bom(&[0x00, 0x61]), BomOutcome::Absent);
    assert_eq!(detect_bom(&[0xFF]), BomOutcome::Absent);
    assert_eq!(detect_bom(&[]), BomOutcome::Absent);
}

#[test]
fn ascii_scan_picks_rightmost_candidate() {
    init_logging();
    // "ÖÐ a ÎÄ" garbled from GBK, cut inside the trailing character.
    let chunk = b"\xC3\x96\xC3\x90 a\xC3\x8E\xC3";
    assert_eq!(find_split(chunk, Alignment::Ascii, chunk.len()), Ok(6));
}

#[test]
fn ascii_scan_reports_capacity_when_no_candidate() {
    init_logging();
    let chunk = b"\xC3\x96\xC3\x90";
    let err = find_split(chunk, Alignment::Ascii, 4).unwrap_err();
    assert_eq!(err, SegmentationFailed { capacity: 4 });
    assert!(err.to_string().contains("4 bytes"));
    assert!(err.to_string().contains("increase the chunk capacity"));
}

#[test]
fn wide_scan_splits_past_narrow_unit() {
    init_logging();
    // "aÖ" in UTF-16LE followed by half of "Ð".
    let le = [0x61, 0x00, 0xD6, 0x00];
    assert_eq!(
        find_split(&le, Alignment::Wide(Some(ByteOrder::Little)), 4),
        Ok(2)
    );
    let be = [0x00, 0xD6, 0x00, 0x61];
    assert_eq!(find_split(&be, Alignment::Wide(Some(ByteOrder::Big)), 4), Ok(4));
}

#[test]
fn unresolved_wide_scans_as_big_endian() {
    init_logging();
    let be = [0x00, 0x61, 0x00, 0xD6];
    assert_eq!(find_split(&be, Alignment::Wide(None), 4), Ok(2));
}

#[test]
fn wide_scan_fails_without_narrow_units() {
    init_logging();
    let le = [0xD6, 0x00, 0xD0, 0x00];
    assert_eq!(
        find_split(&le, Alignment::Wide(Some(ByteOrder::Little)), 4),
        Err(SegmentationFailed { capacity: 4 })
    );
}
