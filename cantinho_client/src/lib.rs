//! Cantinho - point-of-sale client core
//!
//! Backend REST client, session storage and the client-side logic shared by
//! the desktop app and the `cantinho` command-line tool: inventory listing,
//! product editing, sale drafts and barcode scan routing.

pub mod api;
pub mod config;
pub mod edit;
pub mod error;
pub mod formatters;
pub mod listing;
pub mod models;
pub mod navigation;
pub mod product;
pub mod qr_label;
pub mod sale;
pub mod scanner;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use models::{PriceTier, Product};
pub use navigation::{Layout, Navigator, Route, Tab};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, SharedStorage, Storage};
