//! Web (WASM) clock for store-assigned timestamps, where `SystemTime` is unavailable.

/// Milliseconds since the Unix epoch, from the browser's `Date`.
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}
