mod app;
mod components;
mod screens;
mod state;
mod task;

pub use app::{launch_gui, CantinhoApp};

#[cfg(target_os = "android")]
pub use app::launch_gui_android;
