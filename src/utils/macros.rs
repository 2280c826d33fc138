/// MACROS
/// Cross-platform logging.
/// Browser builds write to the devtools console, native builds to a styled stdout line.
#[macro_export]
macro_rules! log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        ::web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        println!("{}", ::console::style(format!($($t)*)).cyan());
    }};
}
