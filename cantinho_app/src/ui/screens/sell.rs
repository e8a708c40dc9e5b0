//! Sale screen: quantity, price tier and discount for one product.

use cantinho_client::formatters::format_currency;
use cantinho_client::models::SaleRequest;
use cantinho_client::sale::{DiscountKind, SaleDraft, SaleError};
use cantinho_client::{ApiResult, PriceTier, Product};
use eframe::egui;

use crate::ui::components::{ConfirmDialog, ConfirmOutcome};
use crate::ui::state::{Services, Shell};
use crate::ui::task::{take_ready, Pending};

pub struct SellState {
    sku: String,
    draft: Option<SaleDraft>,
    fetch: Option<Pending<ApiResult<Product>>>,
    sale: Option<Pending<ApiResult<()>>>,
    confirming: bool,
}

impl SellState {
    pub fn load(sku: &str, ctx: &egui::Context, services: &Services) -> Self {
        let api = services.api.clone();
        let owned = sku.to_string();
        let fetch = Pending::spawn(&services.runtime, ctx, async move {
            api.get_product(&owned).await
        });
        Self {
            sku: sku.to_string(),
            draft: None,
            fetch: Some(fetch),
            sale: None,
            confirming: false,
        }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    fn submit(&mut self, request: SaleRequest, ctx: &egui::Context, services: &Services) {
        log::info!(
            "Selling {} x {} (discount {:.2} per unit)",
            request.quantity,
            self.sku,
            request.discount
        );
        let api = services.api.clone();
        let sku = self.sku.clone();
        self.sale = Some(Pending::spawn(&services.runtime, ctx, async move {
            api.sell(&sku, &request).await
        }));
    }

    fn poll(&mut self, shell: &mut Shell) {
        match take_ready(&mut self.fetch) {
            Some(Ok(product)) => match SaleDraft::new(product) {
                Ok(draft) => self.draft = Some(draft),
                Err(e) => {
                    shell.toasts.error(e.user_message());
                    shell.navigator.pop_to_top();
                    return;
                }
            },
            Some(Err(e)) => {
                shell.report_error("Erro ao carregar este item.", &e);
                shell.navigator.pop_to_top();
                return;
            }
            None => {}
        }

        match take_ready(&mut self.sale) {
            Some(Ok(())) => {
                shell.toasts.success("Vendido!");
                shell.navigator.pop_to_top();
            }
            Some(Err(e)) => shell.report_error("Erro ao realizar a venda.", &e),
            None => {}
        }
    }
}

pub struct SellScreen;

impl SellScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut SellState) {
        state.poll(shell);

        let selling = state.sale.is_some();
        let Some(draft) = state.draft.as_mut() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                });
            });
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&draft.product().name);
            ui.weak(format!(
                "SKU: {}  |  Estoque: {}",
                draft.product().sku,
                draft.product().inventory
            ));
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                for tier in [PriceTier::Card, PriceTier::Cash] {
                    if ui
                        .selectable_label(draft.tier() == tier, tier.label())
                        .clicked()
                    {
                        draft.set_tier(tier);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Quantidade:");
                if ui.button("−").clicked() {
                    if let Err(e) = draft.decrement() {
                        shell.toasts.info(e.user_message());
                    }
                }
                ui.strong(draft.quantity().to_string());
                if ui.button("+").clicked() {
                    if let Err(e) = draft.increment() {
                        shell.toasts.info(e.user_message());
                    }
                }
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Desconto:");
                for kind in [DiscountKind::Percentage, DiscountKind::Value] {
                    if ui
                        .selectable_label(draft.kind() == kind, kind.label())
                        .clicked()
                    {
                        draft.set_kind(kind);
                    }
                }
                let mut text = draft.discount_text().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .hint_text("0")
                        .desired_width(80.0),
                );
                if response.changed() {
                    // The error is rendered below from the draft
                    let _ = draft.set_discount(&text);
                }
            });

            if let Some(error) = draft.discount_error() {
                ui.colored_label(ui.visuals().error_fg_color, error.user_message());
            } else if let Some(warning) = draft.warning() {
                ui.colored_label(ui.visuals().warn_fg_color, warning);
            }
            ui.add_space(10.0);

            let summary = draft.summary();
            egui::Grid::new("sale_summary")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Preço unitário");
                    ui.label(format_currency(summary.unit_price));
                    ui.end_row();
                    ui.label("Desconto por unidade");
                    ui.label(format_currency(summary.discount_per_unit));
                    ui.end_row();
                    ui.label("Preço com desconto");
                    ui.label(format_currency(summary.discounted_unit_price));
                    ui.end_row();
                    ui.label("Lucro por unidade");
                    ui.label(format_currency(summary.unit_profit));
                    ui.end_row();
                    ui.label("Total");
                    ui.label(format_currency(summary.total));
                    ui.end_row();
                    ui.strong("Total com desconto");
                    ui.strong(format_currency(summary.total_discounted));
                    ui.end_row();
                });
            ui.add_space(12.0);

            let enabled = draft.can_sell() && !selling;
            if ui.add_enabled(enabled, egui::Button::new("Vender")).clicked() {
                state.confirming = true;
            }
            if selling {
                ui.spinner();
            }
        });

        if !state.confirming {
            return;
        }
        match ConfirmDialog::new("Vender", "Confirmar a venda?").show(ctx) {
            ConfirmOutcome::Open => {}
            ConfirmOutcome::Cancelled => state.confirming = false,
            ConfirmOutcome::Confirmed => {
                state.confirming = false;
                match state.draft.as_ref().map(SaleDraft::sale_request) {
                    Some(Ok(request)) => state.submit(request, ctx, services),
                    Some(Err(SaleError::Deleted)) => {
                        shell.toasts.error(SaleError::Deleted.user_message());
                        shell.navigator.pop_to_top();
                    }
                    Some(Err(e)) => shell.toasts.error(e.user_message()),
                    None => {}
                }
            }
        }
    }
}
