//! Barcode scanner state: camera permission, capture rectangle hit test and
//! the one-shot latch that turns the first accepted scan into navigation.

use crate::navigation::{Route, Tab};

/// Size of the on-screen finder a code has to be inside of
pub const CAPTURE_WIDTH: f32 = 280.0;
pub const CAPTURE_HEIGHT: f32 = 230.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPermission {
    #[default]
    Pending,
    Granted,
    Denied,
}

impl CameraPermission {
    /// Placeholder text while the camera cannot be shown
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CameraPermission::Pending => Some("Pedindo permissão para utilizar a câmera"),
            CameraPermission::Granted => None,
            CameraPermission::Denied => Some("Sem acesso à câmera"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRect {
    pub min: Point,
    pub width: f32,
    pub height: f32,
}

impl CaptureRect {
    /// Finder centred on a viewport of the given size
    pub fn centered(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            min: Point {
                x: (viewport_width - CAPTURE_WIDTH) / 2.0,
                y: (viewport_height - CAPTURE_HEIGHT) / 2.0,
            },
            width: CAPTURE_WIDTH,
            height: CAPTURE_HEIGHT,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.min.x + self.width
            && point.y >= self.min.y
            && point.y <= self.min.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.min.x + self.width / 2.0,
            y: self.min.y + self.height / 2.0,
        }
    }
}

/// A decoded code and where it was seen on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub data: String,
    pub origin: Point,
}

/// Where a scanned SKU leads from the given tab
pub fn scan_target(tab: Tab, sku: String) -> Route {
    match tab {
        Tab::Sell => Route::Sell { sku },
        Tab::Inventory | Tab::Profile => Route::Item { sku },
    }
}

#[derive(Debug)]
pub struct Scanner {
    permission: CameraPermission,
    rect: CaptureRect,
    scanned: bool,
}

impl Scanner {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            permission: CameraPermission::Pending,
            rect: CaptureRect::centered(viewport_width, viewport_height),
            scanned: false,
        }
    }

    pub fn permission(&self) -> CameraPermission {
        self.permission
    }

    pub fn set_permission(&mut self, permission: CameraPermission) {
        if permission != self.permission {
            log::info!("Camera permission: {:?}", permission);
        }
        self.permission = permission;
    }

    pub fn capture_rect(&self) -> CaptureRect {
        self.rect
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.rect = CaptureRect::centered(width, height);
    }

    pub fn is_latched(&self) -> bool {
        self.scanned
    }

    /// Re-arms the scanner after a handled scan.
    pub fn reset(&mut self) {
        self.scanned = false;
    }

    /// Accepts the first in-frame scan and returns the route it opens.
    /// Later scans are ignored until [`Scanner::reset`].
    pub fn handle_scan(&mut self, scan: &ScanResult, tab: Tab) -> Option<Route> {
        if self.scanned || self.permission != CameraPermission::Granted {
            return None;
        }
        let sku = scan.data.trim();
        if sku.is_empty() {
            return None;
        }
        if !self.rect.contains(scan.origin) {
            log::debug!("Ignoring code outside the finder at {:?}", scan.origin);
            return None;
        }
        self.scanned = true;
        log::info!("Scanned SKU {}", sku);
        Some(scan_target(tab, sku.to_string()))
    }

    /// Input from a keyboard-wedge reader, treated as a hit in the finder centre.
    pub fn handle_typed(&mut self, text: &str, tab: Tab) -> Option<Route> {
        let scan = ScanResult {
            data: text.to_string(),
            origin: self.rect.center(),
        };
        self.handle_scan(&scan, tab)
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
