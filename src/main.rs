#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    ordered_upload::dom::attach_when_ready(ordered_upload::UploadConfig::default());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("ordered-upload runs in the browser; build it for wasm32-unknown-unknown");
}
