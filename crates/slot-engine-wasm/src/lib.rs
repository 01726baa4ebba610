//! WASM bindings for slot-engine.
//!
//! Exposes slot computation and booking conflict detection to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings; errors come
//! back as the same `{"error": ...}` body an HTTP handler would send.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use slot_engine::{ErrorResponse, SlotError};
use wasm_bindgen::prelude::*;

fn to_js_error(err: SlotError) -> JsValue {
    let resp = ErrorResponse::from(&err);
    let body = serde_json::to_string(&resp).unwrap_or_else(|_| resp.error.clone());
    JsValue::from_str(&body)
}

/// Compute open slots for one work window.
///
/// `request_json` is an object of the form
/// `{date, window: {start, end} | null, duration_minutes, grid_minutes, bookings: [{start, end}]}`
/// with `YYYY-MM-DD` dates and `HH:MM:SS` times. Returns a JSON array of
/// `{start_time, end_time}` objects.
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(request_json: &str) -> Result<String, JsValue> {
    slot_engine::wire::compute_json(request_json).map_err(to_js_error)
}

/// Find the existing bookings a proposed booking would overlap.
///
/// `proposed_json` is a `{date, start, end}` object, `existing_json` an array
/// of them. Returns a JSON array of `{existing, overlap_minutes}` objects;
/// adjacent bookings are not reported.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(proposed_json: &str, existing_json: &str) -> Result<String, JsValue> {
    slot_engine::wire::conflicts_json(proposed_json, existing_json).map_err(to_js_error)
}
