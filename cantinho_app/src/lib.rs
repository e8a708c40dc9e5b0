//! Cantinho - point-of-sale app for desktop and Android
//!
//! egui front end over [`cantinho_client`]: sign in, inventory browsing,
//! item management, sales and QR label scanning.

pub mod qr;
pub mod ui;

/// Android entry point. Called by the NativeActivity runtime instead of main().
/// The `android-native-activity` feature in eframe wires this into the Android
/// activity lifecycle automatically.
#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(app: android_activity::AndroidApp) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = ui::launch_gui_android(app) {
        log::error!("Application error: {e}");
    }
}
