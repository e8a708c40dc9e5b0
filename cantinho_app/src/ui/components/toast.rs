use std::time::{Duration, Instant};

use eframe::egui;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// Transient notifications stacked at the bottom of the window.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text.into(), ToastKind::Success);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), ToastKind::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), ToastKind::Error);
    }

    fn push(&mut self, text: String, kind: ToastKind) {
        log::debug!("Toast ({:?}): {}", kind, text);
        self.items.push(Toast {
            text,
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Drops toasts older than [`TOAST_DURATION`] at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_DURATION);
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.expire(Instant::now());
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.items {
                    let fill = match toast.kind {
                        ToastKind::Success => egui::Color32::from_rgb(46, 125, 50),
                        ToastKind::Info => egui::Color32::from_rgb(55, 71, 79),
                        ToastKind::Error => egui::Color32::from_rgb(183, 28, 28),
                    };
                    egui::Frame::popup(ui.style())
                        .fill(fill)
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(&toast.text).color(egui::Color32::WHITE));
                        });
                    ui.add_space(4.0);
                }
            });

        // Keep repainting so toasts disappear without input
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_duration() {
        let mut toasts = Toasts::default();
        toasts.success("Vendido!");
        toasts.error("Erro ao carregar este item.");
        assert_eq!(toasts.items().len(), 2);

        let start = toasts.items()[0].shown_at;
        toasts.expire(start + Duration::from_secs(1));
        assert_eq!(toasts.items().len(), 2);

        toasts.expire(start + TOAST_DURATION + Duration::from_millis(10));
        assert!(toasts.items().is_empty());
    }

    #[test]
    fn kinds_are_kept() {
        let mut toasts = Toasts::default();
        toasts.info("Nenhum item encontrado.");
        assert_eq!(toasts.items()[0].kind, ToastKind::Info);
        assert_eq!(toasts.items()[0].text, "Nenhum item encontrado.");
    }
}
