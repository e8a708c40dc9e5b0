use cantinho_client::edit::{EditError, EditForm};
use cantinho_client::models::ProductUpdate;
use cantinho_client::{ApiResult, Product};
use eframe::egui;

use crate::ui::state::{Services, Shell};
use crate::ui::task::{take_ready, Pending};

pub struct EditState {
    sku: String,
    form: Option<EditForm>,
    fetch: Option<Pending<ApiResult<Product>>>,
    save: Option<Pending<ApiResult<()>>>,
}

impl EditState {
    pub fn load(sku: &str, ctx: &egui::Context, services: &Services) -> Self {
        let api = services.api.clone();
        let owned = sku.to_string();
        let fetch = Pending::spawn(&services.runtime, ctx, async move {
            api.get_product(&owned).await
        });
        Self {
            sku: sku.to_string(),
            form: None,
            fetch: Some(fetch),
            save: None,
        }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    fn submit(&mut self, update: ProductUpdate, ctx: &egui::Context, services: &Services) {
        log::info!("Updating product {}", self.sku);
        let api = services.api.clone();
        let sku = self.sku.clone();
        self.save = Some(Pending::spawn(&services.runtime, ctx, async move {
            api.update_product(&sku, &update).await
        }));
    }

    fn poll(&mut self, shell: &mut Shell) {
        match take_ready(&mut self.fetch) {
            Some(Ok(product)) => self.form = Some(EditForm::from_product(&product)),
            Some(Err(e)) => {
                shell.report_error("Erro ao carregar este item.", &e);
                shell.navigator.go_back();
                return;
            }
            None => {}
        }

        match take_ready(&mut self.save) {
            Some(Ok(())) => {
                shell.toasts.success("Item atualizado com sucesso!");
                shell.navigator.go_back();
            }
            Some(Err(e)) => shell.report_error("Erro ao atualizar o item.", &e),
            None => {}
        }
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
    ui.end_row();
}

pub struct EditScreen;

impl EditScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut EditState) {
        state.poll(shell);

        let mut submitted = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Editar item");
            ui.weak(format!("SKU: {}", state.sku));
            ui.add_space(10.0);

            let saving = state.save.is_some();
            let Some(form) = state.form.as_mut() else {
                ui.spinner();
                return;
            };

            egui::Grid::new("edit_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    field(ui, "Nome", &mut form.name);
                    field(ui, "Preço de compra", &mut form.buy_price);
                    field(ui, "Preço de venda (cartão)", &mut form.sell_price);
                    field(ui, "Preço de venda (à vista)", &mut form.sell_price_cash);
                    field(ui, "Estoque", &mut form.inventory);
                });
            ui.add_space(10.0);

            let update = form.to_update();
            match &update {
                Err(EditError::Unchanged) | Ok(_) => {}
                Err(e) => {
                    ui.colored_label(ui.visuals().error_fg_color, e.user_message());
                }
            }

            let enabled = update.is_ok() && !saving;
            if ui.add_enabled(enabled, egui::Button::new("Salvar")).clicked() {
                submitted = update.ok();
            }
            if saving {
                ui.spinner();
            }
        });

        if let Some(update) = submitted {
            state.submit(update, ctx, services);
        }
    }
}
