use eframe::egui;

use crate::ui::components::{ConfirmDialog, ConfirmOutcome};
use crate::ui::state::{Services, Shell};

#[derive(Default)]
pub struct ProfileState {
    confirm_sign_out: bool,
}

pub struct ProfileScreen;

impl ProfileScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut ProfileState) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Perfil");
            ui.add_space(10.0);

            egui::Grid::new("profile")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Servidor");
                    ui.monospace(&services.config.api_url);
                    ui.end_row();
                    ui.label("Itens por página");
                    ui.label(services.config.page_size.to_string());
                    ui.end_row();
                });

            ui.add_space(20.0);
            if ui.button("Sair").clicked() {
                state.confirm_sign_out = true;
            }
        });

        if !state.confirm_sign_out {
            return;
        }
        match ConfirmDialog::new("Sair", "Deseja mesmo sair?").show(ctx) {
            ConfirmOutcome::Open => {}
            ConfirmOutcome::Cancelled => state.confirm_sign_out = false,
            ConfirmOutcome::Confirmed => {
                state.confirm_sign_out = false;
                shell.session.sign_out();
            }
        }
    }
}
