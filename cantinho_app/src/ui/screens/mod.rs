mod auth;
mod edit;
mod inventory;
mod item;
mod profile;
mod scanner;
mod sell;

pub use auth::{AuthMenuScreen, AuthState, ConfirmTokenScreen, SignInScreen, SignUpScreen};
pub use edit::{EditScreen, EditState};
pub use inventory::{InventoryScreen, InventoryState};
pub use item::{ItemScreen, ItemState};
pub use profile::{ProfileScreen, ProfileState};
pub use scanner::{ScannerScreen, ScannerState};
pub use sell::{SellScreen, SellState};
