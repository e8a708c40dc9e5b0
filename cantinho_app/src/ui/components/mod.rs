mod confirm_dialog;
mod toast;

pub use confirm_dialog::{ConfirmDialog, ConfirmOutcome};
pub use toast::Toasts;
