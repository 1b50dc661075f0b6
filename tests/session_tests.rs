//! # Session Tests
//!
//! Byte-exact checks of what a session writes to its sink, and of the
//! open/close lifecycle on success and failure paths.

use pretty_assertions::assert_eq;

use escp::transport::{DeviceChannel, MemoryHandle, MemorySink};
use escp::{CharacterSet, EscpError, PrinterProfile, Session};

/// Initialize, 10 cpi, draft, USA table
const RESET: &[u8] = &[
    0x1B, 0x40, // ESC @
    0x1B, 0x50, // ESC P
    0x1B, 0x78, 0x30, // ESC x 0
    0x1B, 0x28, 0x74, 0x03, 0x00, 0x01, 0x01, 0x00, // ESC ( t 3 0 1 1 0
    0x1B, 0x74, 0x01, // ESC t 1
];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn open(profile: PrinterProfile) -> (Session<MemorySink>, MemoryHandle) {
    let sink = MemorySink::new();
    let handle = sink.handle();
    (Session::open(profile, sink).unwrap(), handle)
}

/// Bytes written after the reset sequence
fn body(handle: &MemoryHandle) -> Vec<u8> {
    let bytes = handle.bytes();
    assert_eq!(&bytes[..RESET.len()], RESET);
    bytes[RESET.len()..].to_vec()
}

// ============================================================================
// COMMANDS
// ============================================================================

#[test]
fn test_open_writes_reset_then_nothing_else() {
    let (session, out) = open(PrinterProfile::NINE_PIN);
    assert_eq!(out.bytes(), RESET.to_vec());
    session.close().unwrap();
    assert_eq!(out.bytes(), RESET.to_vec());
}

#[test]
fn test_pitch_quality_and_styles() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.select_10cpi().unwrap();
    s.select_15cpi().unwrap();
    s.draft_quality().unwrap();
    s.letter_quality().unwrap();
    s.bold(true).unwrap();
    s.bold(false).unwrap();
    s.proportional(true).unwrap();
    s.proportional(false).unwrap();
    s.close().unwrap();

    assert_eq!(
        body(&out),
        vec![
            0x1B, 0x50, 0x1B, 0x67, 0x1B, 0x78, 0x30, 0x1B, 0x78, 0x31, 0x1B, 0x45, 0x1B, 0x46,
            0x1B, 0x70, 0x31, 0x1B, 0x70, 0x30,
        ]
    );
}

#[test]
fn test_select_10cpi_twice_is_identical() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.select_10cpi().unwrap();
    s.select_10cpi().unwrap();
    s.close().unwrap();
    assert_eq!(body(&out), vec![0x1B, 0x50, 0x1B, 0x50]);
}

#[test]
fn test_character_set_brazil() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.set_character_set(CharacterSet::BRAZIL).unwrap();
    s.print("Ação").unwrap();
    s.close().unwrap();

    assert_eq!(
        body(&out),
        vec![
            0x1B, 0x28, 0x74, 0x03, 0x00, 0x01, 0x19, 0x00, 0x1B, 0x74, 0x01, // table
            b'A', 0xE7, 0xE3, b'o', // "Ação" in BRASCII
        ]
    );
}

#[test]
fn test_print_uses_pc437_by_default() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.print("Café ñ").unwrap();
    s.close().unwrap();
    assert_eq!(body(&out), vec![b'C', b'a', b'f', 0x82, b' ', 0xA4]);
}

#[test]
fn test_line_and_form_feed() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.line_feed().unwrap();
    s.form_feed().unwrap();
    s.close().unwrap();
    assert_eq!(body(&out), vec![0x0D, 0x0A, 0x0D, 0x0C]);
}

#[test]
fn test_tabs_and_margins() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.horizontal_tab(0).unwrap();
    s.horizontal_tab(2).unwrap();
    s.set_margins(5, 75).unwrap();
    s.close().unwrap();
    assert_eq!(body(&out), vec![0x09, 0x09, 0x1B, 0x6C, 5, 0x1B, 0x51, 75]);
}

#[test]
fn test_advance_vertical_five_cm_24pin() {
    // 5cm = 1.9685" * 180 = 354 units -> 127 + 127 + 100
    let (mut s, out) = open(PrinterProfile::TWENTY_FOUR_PIN);
    s.advance_vertical(5.0).unwrap();
    s.close().unwrap();
    assert_eq!(
        body(&out),
        vec![0x1B, 0x4A, 0x7F, 0x1B, 0x4A, 0x7F, 0x1B, 0x4A, 0x64]
    );
}

#[test]
fn test_advance_vertical_depends_on_pin_class() {
    let (mut nine, nine_out) = open(PrinterProfile::NINE_PIN);
    let (mut wide, wide_out) = open(PrinterProfile::FORTY_EIGHT_PIN);
    nine.advance_vertical(2.54).unwrap();
    wide.advance_vertical(2.54).unwrap();
    nine.close().unwrap();
    wide.close().unwrap();

    // one inch: 216 = 127 + 89, 180 = 127 + 53
    assert_eq!(body(&nine_out), vec![0x1B, 0x4A, 127, 0x1B, 0x4A, 89]);
    assert_eq!(body(&wide_out), vec![0x1B, 0x4A, 127, 0x1B, 0x4A, 53]);
}

#[test]
fn test_advance_vertical_zero_writes_nothing() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.advance_vertical(0.0).unwrap();
    s.close().unwrap();
    assert_eq!(body(&out), Vec::<u8>::new());
}

#[test]
fn test_horizontal_relative_vs_absolute() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.advance_horizontal(10.0).unwrap();
    s.set_absolute_horizontal_position(10.0).unwrap();
    s.close().unwrap();
    assert_eq!(
        body(&out),
        vec![
            0x1B, 0x5C, 0xD8, 0x01, // 472 units of 1/120"
            0x1B, 0x24, 0xEC, 0x00, // 236 units of 1/60"
        ]
    );
}

#[test]
fn test_demo_page_24pin() {
    let (mut s, out) = open(PrinterProfile::TWENTY_FOUR_PIN);
    s.select_15cpi().unwrap();
    s.advance_vertical(5.0).unwrap();
    s.set_absolute_horizontal_position(5.0).unwrap();
    s.bold(true).unwrap();
    s.print("Hi").unwrap();
    s.bold(false).unwrap();
    s.advance_vertical(1.0).unwrap();
    s.form_feed().unwrap();
    s.close().unwrap();

    assert_eq!(
        body(&out),
        vec![
            0x1B, 0x67, // 15 cpi
            0x1B, 0x4A, 127, 0x1B, 0x4A, 127, 0x1B, 0x4A, 100, // 5cm down
            0x1B, 0x24, 118, 0x00, // 5cm from the left margin
            0x1B, 0x45, b'H', b'i', 0x1B, 0x46, // bold text
            0x1B, 0x4A, 70, // 1cm down
            0x0D, 0x0C, // eject
        ]
    );
}

#[test]
fn test_write_raw_and_send_job() {
    let (mut s, out) = open(PrinterProfile::NINE_PIN);
    s.write_raw(&[0x1B, 0x40]).unwrap();

    let job: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let sent = s.send_job(job.as_slice()).unwrap();
    s.close().unwrap();

    assert_eq!(sent, job.len() as u64);
    let mut expected = vec![0x1B, 0x40];
    expected.extend(&job);
    assert_eq!(body(&out), expected);
}

#[test]
fn test_read_status() {
    let sink = MemorySink::new().with_status(&[0x18]);
    let mut s = Session::open(PrinterProfile::NINE_PIN, sink).unwrap();
    let mut buf = [0u8; 8];
    assert_eq!(s.read_status(&mut buf).unwrap(), 1);
    assert_eq!(buf[0], 0x18);
    s.close().unwrap();
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_close_flushes_then_releases() {
    let (s, out) = open(PrinterProfile::NINE_PIN);
    assert!(!out.is_closed());
    s.close().unwrap();
    assert!(out.is_closed());
    assert_eq!(out.flush_count(), 1);
}

#[test]
fn test_open_refused_channel() {
    let err = Session::open(PrinterProfile::NINE_PIN, MemorySink::new().refuse_open()).unwrap_err();
    match err {
        EscpError::ChannelOpenFailed { target, source } => {
            assert_eq!(target, "memory");
            assert_eq!(source.kind(), std::io::ErrorKind::ConnectionRefused);
        }
        other => panic!("expected ChannelOpenFailed, got {other:?}"),
    }
}

#[test]
fn test_open_missing_device() {
    let dir = tempfile::tempdir().unwrap();
    let channel = DeviceChannel::new(dir.path().join("lp0"));
    let err = Session::open(PrinterProfile::NINE_PIN, channel).unwrap_err();
    assert!(matches!(err, EscpError::ChannelOpenFailed { .. }));
}

#[test]
fn test_failed_reset_releases_channel() {
    let sink = MemorySink::new().fail_after(5);
    let out = sink.handle();

    let err = Session::open(PrinterProfile::NINE_PIN, sink).unwrap_err();
    assert!(matches!(err, EscpError::WriteFailed(_)));
    assert!(out.is_closed());
    // ESC @, ESC P, then one byte of ESC x 0
    assert_eq!(out.bytes(), vec![0x1B, 0x40, 0x1B, 0x50, 0x1B]);
}

#[test]
fn test_write_failure_poisons_session_but_close_releases() {
    let sink = MemorySink::new().fail_after(RESET.len() + 4);
    let out = sink.handle();
    let mut s = Session::open(PrinterProfile::NINE_PIN, sink).unwrap();

    // 255 units -> ESC J 127, ESC J 127, ESC J 1; the second one breaks mid-command
    let err = s.advance_vertical(3.0).unwrap_err();
    assert!(matches!(err, EscpError::WriteFailed(_)));
    assert!(s.is_poisoned());
    assert!(matches!(s.form_feed(), Err(EscpError::InvalidState(_))));

    s.close().unwrap();
    assert!(out.is_closed());
    assert_eq!(out.bytes().len(), RESET.len() + 4);
}

#[test]
fn test_session_writes_to_file_device() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.prn");

    let mut s = Session::open(PrinterProfile::NINE_PIN, DeviceChannel::file(&path)).unwrap();
    s.line_feed().unwrap();
    s.close().unwrap();

    let mut expected = RESET.to_vec();
    expected.extend([0x0D, 0x0A]);
    assert_eq!(std::fs::read(&path).unwrap(), expected);
}
