//! Barcode scanner screen.
//!
//! Codes come from two sources: a picked label photo decoded with rqrr
//! (desktop only) and keyboard-wedge readers, which type the SKU followed by
//! Enter. Either way the shared [`Scanner`] decides whether the hit counts.

use cantinho_client::scanner::{CameraPermission, Scanner, ScanResult, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use cantinho_client::{Route, Tab};
use eframe::egui;

use crate::qr::{self, DecodedImage};
use crate::ui::state::Shell;

pub struct ScannerState {
    scanner: Scanner,
    typed: String,
    picture: Option<(egui::TextureHandle, DecodedImage)>,
    /// Picture decoded but not yet fed to the scanner
    unfed: bool,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self {
            scanner: Scanner::new(CAPTURE_WIDTH, CAPTURE_HEIGHT),
            typed: String::new(),
            picture: None,
            unfed: false,
        }
    }
}

impl ScannerState {
    /// Clears leftover input when the screen becomes visible again. A latched
    /// scanner stays latched until "Escanear novamente".
    pub fn on_focus(&mut self) {
        self.typed.clear();
        self.picture = None;
        self.unfed = false;
    }

    /// Re-arms the scanner.
    pub fn reset(&mut self) {
        self.scanner.reset();
        self.typed.clear();
        self.picture = None;
        self.unfed = false;
    }

    fn feed(&mut self, scans: &[ScanResult], tab: Tab) -> Option<Route> {
        scans.iter().find_map(|scan| self.scanner.handle_scan(scan, tab))
    }

    #[cfg(not(target_os = "android"))]
    fn image_button(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, shell: &mut Shell) {
        if ui.button("🖼 Abrir imagem").clicked() {
            self.pick_image(ctx, shell);
        }
    }

    /// No file dialogs on Android; only reader input is available there
    #[cfg(target_os = "android")]
    fn image_button(&mut self, _ui: &mut egui::Ui, _ctx: &egui::Context, _shell: &mut Shell) {}

    #[cfg(not(target_os = "android"))]
    fn pick_image(&mut self, ctx: &egui::Context, shell: &mut Shell) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Imagens", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return;
        };

        let decoded = std::fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| {
                let decoded = qr::decode_qr_codes(&bytes)?;
                let preview = image::load_from_memory(&bytes)?.to_rgba8();
                Ok((decoded, preview))
            });

        match decoded {
            Ok((decoded, preview)) => {
                if decoded.codes.is_empty() {
                    shell.toasts.info("Nenhum código encontrado na imagem.");
                }
                let size = [preview.width() as usize, preview.height() as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, &preview.into_raw());
                let texture =
                    ctx.load_texture("scanner_preview", color_image, egui::TextureOptions::LINEAR);
                self.picture = Some((texture, decoded));
                self.unfed = true;
            }
            Err(e) => {
                log::error!("Failed to scan {}: {:#}", path.display(), e);
                shell.toasts.error("Não foi possível ler a imagem.");
            }
        }
    }
}

pub struct ScannerScreen;

impl ScannerScreen {
    pub fn show(ctx: &egui::Context, shell: &mut Shell, state: &mut ScannerState) {
        // No permission prompt on these targets; the first frame grants it
        if state.scanner.permission() == CameraPermission::Pending {
            state.scanner.set_permission(CameraPermission::Granted);
            ctx.request_repaint();
        }

        let tab = shell.navigator.active_tab();
        let mut opened = None;

        egui::TopBottomPanel::bottom("scanner_controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.typed)
                        .hint_text("Código (leitor)")
                        .desired_width(180.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    opened = state.scanner.handle_typed(&state.typed, tab);
                    state.typed.clear();
                }

                state.image_button(ui, ctx, shell);

                if state.scanner.is_latched() && ui.button("Escanear novamente").clicked() {
                    state.reset();
                }
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = state.scanner.permission().message() {
                ui.centered_and_justified(|ui| ui.label(message));
                return;
            }

            let viewport = ui.available_rect_before_wrap();
            state.scanner.set_viewport(viewport.width(), viewport.height());

            let painter = ui.painter_at(viewport);
            painter.rect_filled(viewport, 0.0, egui::Color32::from_gray(20));

            let mut scans = Vec::new();
            if let Some((texture, decoded)) = &state.picture {
                painter.image(
                    texture.id(),
                    viewport,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                if state.unfed {
                    scans = decoded.scans(viewport.width(), viewport.height());
                }
            }
            if state.unfed && opened.is_none() {
                state.unfed = false;
                opened = state.feed(&scans, tab);
                if opened.is_none() && !scans.is_empty() {
                    shell.toasts.info("Posicione o código dentro do quadro.");
                }
            }

            let finder = state.scanner.capture_rect();
            let finder_rect = egui::Rect::from_min_size(
                viewport.min + egui::vec2(finder.min.x, finder.min.y),
                egui::vec2(finder.width, finder.height),
            );
            let color = if state.scanner.is_latched() {
                egui::Color32::from_rgb(46, 125, 50)
            } else {
                egui::Color32::WHITE
            };
            painter.rect_stroke(
                finder_rect,
                8.0,
                egui::Stroke::new(3.0, color),
                egui::StrokeKind::Outside,
            );
            painter.text(
                finder_rect.center_bottom() + egui::vec2(0.0, 16.0),
                egui::Align2::CENTER_TOP,
                "Posicione o código dentro do quadro",
                egui::FontId::proportional(14.0),
                egui::Color32::LIGHT_GRAY,
            );
            ui.allocate_rect(viewport, egui::Sense::hover());
        });

        if let Some(route) = opened {
            shell.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted() -> ScannerState {
        let mut state = ScannerState::default();
        state.scanner.set_permission(CameraPermission::Granted);
        state
    }

    #[test]
    fn focus_keeps_the_latch() {
        let mut state = granted();
        assert_eq!(
            state.scanner.handle_typed("SKU1", Tab::Inventory),
            Some(Route::Item {
                sku: "SKU1".to_string()
            })
        );

        state.on_focus();

        assert!(state.scanner.is_latched());
        assert_eq!(state.scanner.handle_typed("SKU2", Tab::Inventory), None);
    }

    #[test]
    fn scan_again_rearms() {
        let mut state = granted();
        state.scanner.handle_typed("SKU1", Tab::Sell);
        state.on_focus();

        state.reset();

        assert_eq!(
            state.scanner.handle_typed("SKU2", Tab::Sell),
            Some(Route::Sell {
                sku: "SKU2".to_string()
            })
        );
    }
}
