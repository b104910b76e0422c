//! Browser console logging

macro_rules! console_log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!("[form-guard] {}", format!($($t)*)).into())
    };
}

macro_rules! console_warn {
    ($($t:tt)*) => {
        web_sys::console::warn_1(&format!("[form-guard] {}", format!($($t)*)).into())
    };
}

macro_rules! console_debug {
    ($($t:tt)*) => {
        web_sys::console::debug_1(&format!("[form-guard] {}", format!($($t)*)).into())
    };
}
