//! Page Controller Unit Tests.
//!
//! Verifies OpenPageController (row-buffer state machine), ClosePageController
//! (fixed activation cost) and FixedLatencyController against a single bank.

use memsim_core::dram::RowbufEntry;
use memsim_core::dram::controller::{
    ClosePageController, DramTiming, FixedLatencyController, OpenPageController, PageController,
};

/// Distinct per-phase latencies so every sum is unambiguous.
const TIMING: DramTiming = DramTiming {
    t_act: 20,
    t_cas: 10,
    t_pre: 15,
    t_bus: 4,
};

#[test]
fn timing_sums() {
    assert_eq!(TIMING.activate_read(), 34);
    assert_eq!(TIMING.row_hit(), 14);
    assert_eq!(TIMING.row_conflict(), 49);
}

// ══════════════════════════════════════════════════════════
// 1. Open page
// ══════════════════════════════════════════════════════════

#[test]
fn open_page_empty_buffer_activates() {
    let mut ctrl = OpenPageController::new(TIMING);
    let mut bank = RowbufEntry::default();

    assert_eq!(ctrl.access_delay(&mut bank, 7), 34);
    assert_eq!(bank.open_row(), Some(7));
}

#[test]
fn open_page_row_hit_skips_activation() {
    let mut ctrl = OpenPageController::new(TIMING);
    let mut bank = RowbufEntry::default();

    let _ = ctrl.access_delay(&mut bank, 7);
    assert_eq!(ctrl.access_delay(&mut bank, 7), 14);
    assert_eq!(ctrl.access_delay(&mut bank, 7), 14);
    assert_eq!(bank.open_row(), Some(7));
}

#[test]
fn open_page_row_conflict_precharges_and_switches() {
    let mut ctrl = OpenPageController::new(TIMING);
    let mut bank = RowbufEntry::default();

    let _ = ctrl.access_delay(&mut bank, 7);
    assert_eq!(ctrl.access_delay(&mut bank, 8), 49);
    assert_eq!(bank.open_row(), Some(8));
    // The new row is now the open one.
    assert_eq!(ctrl.access_delay(&mut bank, 8), 14);
    assert_eq!(ctrl.access_delay(&mut bank, 7), 49);
}

/// Row 0 is a real row: an empty buffer must not be mistaken for "row 0 open".
#[test]
fn open_page_row_zero_is_not_implicitly_open() {
    let mut ctrl = OpenPageController::new(TIMING);
    let mut bank = RowbufEntry::default();
    assert_eq!(ctrl.access_delay(&mut bank, 0), 34);
    assert_eq!(ctrl.access_delay(&mut bank, 0), 14);
}

// ══════════════════════════════════════════════════════════
// 2. Close page
// ══════════════════════════════════════════════════════════

#[test]
fn close_page_constant_and_stateless() {
    let mut ctrl = ClosePageController::new(TIMING);
    let mut bank = RowbufEntry::default();

    for row in [3, 3, 9, 3, 0] {
        assert_eq!(ctrl.access_delay(&mut bank, row), 34);
    }
    assert_eq!(bank, RowbufEntry::default());
}

// ══════════════════════════════════════════════════════════
// 3. Fixed latency
// ══════════════════════════════════════════════════════════

#[test]
fn fixed_latency_ignores_rows() {
    let mut ctrl = FixedLatencyController::new(100);
    let mut bank = RowbufEntry::default();
    assert_eq!(ctrl.access_delay(&mut bank, 1), 100);
    assert_eq!(ctrl.access_delay(&mut bank, 2), 100);
    assert_eq!(bank.open_row(), None);
}
