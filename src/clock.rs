// src/clock.rs

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Milliseconds from `performance.now()`, as nanoseconds.
        pub fn now_nanos() -> u64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| (p.now() * 1_000_000.0) as u64)
                .unwrap_or(0)
        }
    } else {
        use std::sync::OnceLock;
        use std::time::Instant;

        static START: OnceLock<Instant> = OnceLock::new();

        /// Nanoseconds since the first call.
        pub fn now_nanos() -> u64 {
            START.get_or_init(Instant::now).elapsed().as_nanos() as u64
        }
    }
}
