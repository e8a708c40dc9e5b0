use super::*;

fn granted(width: f32, height: f32) -> Scanner {
    let mut scanner = Scanner::new(width, height);
    scanner.set_permission(CameraPermission::Granted);
    scanner
}

fn scan(data: &str, x: f32, y: f32) -> ScanResult {
    ScanResult {
        data: data.to_string(),
        origin: Point { x, y },
    }
}

#[test]
fn capture_rect_is_centred() {
    let rect = CaptureRect::centered(400.0, 800.0);
    assert_eq!(rect.min, Point { x: 60.0, y: 285.0 });
    assert_eq!(rect.center(), Point { x: 200.0, y: 400.0 });

    assert!(rect.contains(Point { x: 60.0, y: 285.0 }));
    assert!(rect.contains(Point { x: 340.0, y: 515.0 }));
    assert!(!rect.contains(Point { x: 59.9, y: 400.0 }));
    assert!(!rect.contains(Point { x: 200.0, y: 516.0 }));
}

#[test]
fn permission_messages() {
    assert_eq!(
        CameraPermission::Pending.message(),
        Some("Pedindo permissão para utilizar a câmera")
    );
    assert_eq!(CameraPermission::Denied.message(), Some("Sem acesso à câmera"));
    assert_eq!(CameraPermission::Granted.message(), None);
}

#[test]
fn scans_are_ignored_without_permission() {
    let mut scanner = Scanner::new(400.0, 800.0);
    assert_eq!(scanner.handle_scan(&scan("A1", 200.0, 400.0), Tab::Inventory), None);

    scanner.set_permission(CameraPermission::Denied);
    assert_eq!(scanner.handle_scan(&scan("A1", 200.0, 400.0), Tab::Inventory), None);
    assert!(!scanner.is_latched());
}

#[test]
fn scan_outside_finder_is_ignored() {
    let mut scanner = granted(400.0, 800.0);
    assert_eq!(scanner.handle_scan(&scan("A1", 10.0, 10.0), Tab::Inventory), None);
    assert!(!scanner.is_latched());
}

#[test]
fn first_scan_latches_and_routes_by_tab() {
    let mut scanner = granted(400.0, 800.0);

    let route = scanner.handle_scan(&scan(" A1 ", 200.0, 400.0), Tab::Inventory);
    assert_eq!(route, Some(Route::Item { sku: "A1".to_string() }));
    assert!(scanner.is_latched());

    assert_eq!(scanner.handle_scan(&scan("B2", 200.0, 400.0), Tab::Inventory), None);

    scanner.reset();
    let route = scanner.handle_scan(&scan("B2", 200.0, 400.0), Tab::Sell);
    assert_eq!(route, Some(Route::Sell { sku: "B2".to_string() }));
}

#[test]
fn blank_payload_does_not_latch() {
    let mut scanner = granted(400.0, 800.0);
    assert_eq!(scanner.handle_typed("   ", Tab::Sell), None);
    assert!(!scanner.is_latched());
}

#[test]
fn typed_code_counts_as_centred_hit() {
    let mut scanner = granted(1024.0, 768.0);
    assert_eq!(
        scanner.handle_typed("SKU-9", Tab::Sell),
        Some(Route::Sell {
            sku: "SKU-9".to_string()
        })
    );
}

#[test]
fn viewport_change_moves_finder() {
    let mut scanner = granted(400.0, 800.0);
    scanner.set_viewport(1000.0, 1000.0);
    assert_eq!(scanner.capture_rect().min, Point { x: 360.0, y: 385.0 });
    assert_eq!(scanner.handle_scan(&scan("A1", 200.0, 400.0), Tab::Inventory), None);
}
