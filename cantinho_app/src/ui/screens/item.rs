//! Item detail: prices, profit per tier, QR label and the item actions.

use cantinho_client::product::{ProductDetail, TierSummary};
use cantinho_client::qr_label::{default_label_dir, resolve_qr, save_label};
use cantinho_client::{ApiResult, Product, Route};
use eframe::egui;

use crate::ui::components::{ConfirmDialog, ConfirmOutcome};
use crate::ui::state::{Services, Shell};
use crate::ui::task::{take_ready, Pending};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemAction {
    Delete,
    Reactivate,
}

pub struct ItemState {
    sku: String,
    detail: Option<ProductDetail>,
    fetch: Option<Pending<ApiResult<Product>>>,
    action: Option<Pending<ApiResult<()>>>,
    action_kind: ItemAction,
    qr_fetch: Option<Pending<ApiResult<Vec<u8>>>>,
    qr_bytes: Option<Vec<u8>>,
    qr_texture: Option<egui::TextureHandle>,
    confirm_delete: bool,
}

impl ItemState {
    /// Starts loading `sku`; called every time the item route gains focus.
    pub fn load(sku: &str, ctx: &egui::Context, services: &Services) -> Self {
        let mut state = Self {
            sku: sku.to_string(),
            detail: None,
            fetch: None,
            action: None,
            action_kind: ItemAction::Delete,
            qr_fetch: None,
            qr_bytes: None,
            qr_texture: None,
            confirm_delete: false,
        };
        state.refetch(ctx, services);
        state
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    fn refetch(&mut self, ctx: &egui::Context, services: &Services) {
        let api = services.api.clone();
        let sku = self.sku.clone();
        self.fetch = Some(Pending::spawn(&services.runtime, ctx, async move {
            api.get_product(&sku).await
        }));
    }

    fn start_action(&mut self, action: ItemAction, ctx: &egui::Context, services: &Services) {
        let api = services.api.clone();
        let sku = self.sku.clone();
        log::info!("{:?} product {}", action, sku);
        let pending = Pending::spawn(&services.runtime, ctx, async move {
            match action {
                ItemAction::Delete => api.delete_product(&sku).await,
                ItemAction::Reactivate => api.reactivate_product(&sku).await,
            }
        });
        self.action_kind = action;
        self.action = Some(pending);
    }

    fn poll(&mut self, ctx: &egui::Context, services: &Services, shell: &mut Shell) {
        match take_ready(&mut self.fetch) {
            Some(Ok(product)) => {
                log::debug!("Loaded product {}", product.sku);
                self.detail = Some(ProductDetail::new(&product));
                if self.qr_bytes.is_none() && !product.qr_code.is_empty() {
                    let api = services.api.clone();
                    let qr_code = product.qr_code.clone();
                    self.qr_fetch = Some(Pending::spawn(&services.runtime, ctx, async move {
                        resolve_qr(&api, &qr_code).await
                    }));
                }
            }
            Some(Err(e)) => {
                shell.report_error("Erro ao carregar este item.", &e);
                shell.navigator.go_back();
                return;
            }
            None => {}
        }

        match take_ready(&mut self.qr_fetch) {
            Some(Ok(bytes)) => {
                self.qr_texture = load_texture(ctx, &format!("qr_{}", self.sku), &bytes);
                self.qr_bytes = Some(bytes);
            }
            Some(Err(e)) => log::warn!("QR code for {} unavailable: {}", self.sku, e),
            None => {}
        }

        if let Some(result) = take_ready(&mut self.action) {
            match (self.action_kind, result) {
                (ItemAction::Delete, Ok(())) => {
                    shell.toasts.success("Item excluído com sucesso!");
                    shell.navigator.go_back();
                }
                (ItemAction::Reactivate, Ok(())) => {
                    shell.toasts.success("Item reativado com sucesso!");
                    self.refetch(ctx, services);
                }
                (ItemAction::Delete, Err(e)) => shell.report_error("Erro ao excluir o item.", &e),
                (ItemAction::Reactivate, Err(e)) => {
                    shell.report_error("Erro ao reativar o item.", &e)
                }
            }
        }
    }

    fn export_label(&self, shell: &mut Shell) {
        let Some(bytes) = self.qr_bytes.as_deref() else {
            return;
        };
        let dir = default_label_dir();
        match save_label(&dir, &self.sku, bytes) {
            Ok(path) => {
                log::info!("Saved QR label to {}", path.display());
                shell.toasts.success(format!("QR code salvo em {}", path.display()));
            }
            Err(e) => shell.report_error("Erro ao salvar o QR code.", &e),
        }
    }
}

fn load_texture(ctx: &egui::Context, name: &str, bytes: &[u8]) -> Option<egui::TextureHandle> {
    match image::load_from_memory(bytes) {
        Ok(image) => {
            let rgba = image.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.into_raw();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
            Some(ctx.load_texture(name, color_image, egui::TextureOptions::NEAREST))
        }
        Err(e) => {
            log::warn!("Failed to decode QR image {}: {}", name, e);
            None
        }
    }
}

fn tier_rows(ui: &mut egui::Ui, summary: &TierSummary) {
    ui.label(format!("Preço de venda ({})", summary.tier.label()));
    ui.label(&summary.price);
    ui.end_row();
    ui.label("Lucro");
    ui.label(format!("{} ({})", summary.profit_value, summary.profit_percentage));
    ui.end_row();
}

pub struct ItemScreen;

impl ItemScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut ItemState) {
        state.poll(ctx, services, shell);

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(detail) = state.detail.clone() else {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                });
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(&detail.name);
                ui.weak(format!("SKU: {}", detail.sku));
                if detail.deleted {
                    ui.colored_label(ui.visuals().warn_fg_color, "Este item foi excluído.");
                }
                ui.add_space(10.0);

                egui::Grid::new("item_detail")
                    .num_columns(2)
                    .spacing([20.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label("Estoque");
                        ui.label(&detail.inventory);
                        ui.end_row();
                        ui.label("Preço de compra");
                        ui.label(&detail.buy_price);
                        ui.end_row();
                        tier_rows(ui, &detail.card);
                        tier_rows(ui, &detail.cash);
                        ui.label("Criado em");
                        ui.label(&detail.created_at);
                        ui.end_row();
                        if let Some(updated_at) = &detail.updated_at {
                            ui.label("Atualizado em");
                            ui.label(updated_at);
                            ui.end_row();
                        }
                    });

                if let Some(texture) = &state.qr_texture {
                    ui.add_space(10.0);
                    ui.add(egui::Image::new(texture).fit_to_exact_size(egui::vec2(180.0, 180.0)));
                    if ui.button("💾 Salvar QR code").clicked() {
                        state.export_label(shell);
                    }
                }

                ui.add_space(16.0);
                let busy = state.action.is_some();
                ui.horizontal(|ui| {
                    if detail.deleted {
                        if ui
                            .add_enabled(!busy, egui::Button::new("Reativar"))
                            .clicked()
                        {
                            state.start_action(ItemAction::Reactivate, ctx, services);
                        }
                        return;
                    }
                    if ui.add_enabled(!busy, egui::Button::new("Editar")).clicked() {
                        shell.push(Route::Edit {
                            sku: detail.sku.clone(),
                        });
                    }
                    if ui.add_enabled(!busy, egui::Button::new("Vender")).clicked() {
                        shell.push(Route::Sell {
                            sku: detail.sku.clone(),
                        });
                    }
                    if ui.add_enabled(!busy, egui::Button::new("Excluir")).clicked() {
                        state.confirm_delete = true;
                    }
                });
                if busy {
                    ui.spinner();
                }
            });
        });

        if state.confirm_delete {
            match ConfirmDialog::new("Excluir", "Deseja mesmo excluir o item?").show(ctx) {
                ConfirmOutcome::Open => {}
                ConfirmOutcome::Cancelled => state.confirm_delete = false,
                ConfirmOutcome::Confirmed => {
                    state.confirm_delete = false;
                    state.start_action(ItemAction::Delete, ctx, services);
                }
            }
        }
    }
}
