use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Open,
    Confirmed,
    Cancelled,
}

/// Modal yes/no question, e.g. "Deseja mesmo excluir o item?"
pub struct ConfirmDialog<'a> {
    pub title: &'a str,
    pub question: &'a str,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, question: &'a str) -> Self {
        Self { title, question }
    }

    pub fn show(&self, ctx: &egui::Context) -> ConfirmOutcome {
        let mut outcome = ConfirmOutcome::Open;
        egui::Window::new(self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(self.question);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        outcome = ConfirmOutcome::Cancelled;
                    }
                    if ui.button("Sim").clicked() {
                        outcome = ConfirmOutcome::Confirmed;
                    }
                });
            });
        outcome
    }
}
