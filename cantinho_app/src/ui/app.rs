use std::sync::Arc;

use anyhow::Context as _;
use cantinho_client::{
    ApiClient, Config, FileStorage, Layout, Route, Session, SharedStorage, Tab,
};
use eframe::{self, egui};
use egui::ViewportBuilder;
use tokio::runtime::Runtime;

use super::{
    screens::{
        AuthMenuScreen, AuthState, ConfirmTokenScreen, EditScreen, EditState, InventoryScreen,
        InventoryState, ItemScreen, ItemState, ProfileScreen, ProfileState, ScannerScreen,
        ScannerState, SellScreen, SellState, SignInScreen, SignUpScreen,
    },
    state::{Services, Shell},
};

pub struct CantinhoApp {
    services: Services,
    shell: Shell,
    auth: AuthState,
    inventory: InventoryState,
    item: Option<ItemState>,
    edit: Option<EditState>,
    sell: Option<SellState>,
    scanner: ScannerState,
    profile: ProfileState,
}

impl CantinhoApp {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let runtime = Runtime::new().context("Failed to start the async runtime")?;
        let storage: SharedStorage = Arc::new(FileStorage::new(&config.storage_path));
        let api = ApiClient::new(&config.api_url, storage.clone());
        let session = Session::load(storage);
        log::info!(
            "Backend {} ({})",
            config.api_url,
            if session.is_signed_in() { "signed in" } else { "signed out" }
        );

        Ok(Self {
            inventory: InventoryState::new(config.page_size),
            services: Services {
                api,
                runtime,
                config,
            },
            shell: Shell::new(session),
            auth: AuthState::default(),
            item: None,
            edit: None,
            sell: None,
            scanner: ScannerState::default(),
            profile: ProfileState::default(),
        })
    }

    /// Every screen shows a fresh snapshot of the backend when it becomes
    /// visible again.
    fn on_focus(&mut self, ctx: &egui::Context, route: Route) {
        log::debug!("Focus {:?}", route);
        match route {
            Route::InventoryHome => self.inventory.refresh(ctx, &self.services),
            Route::Item { sku } => self.item = Some(ItemState::load(&sku, ctx, &self.services)),
            Route::Edit { sku } => self.edit = Some(EditState::load(&sku, ctx, &self.services)),
            Route::Sell { sku } => self.sell = Some(SellState::load(&sku, ctx, &self.services)),
            Route::Scanner => self.scanner.on_focus(),
            Route::AuthMenu
            | Route::SignIn
            | Route::SignUp
            | Route::TokenConfirm
            | Route::Profile => {}
        }
    }

    fn show_chrome(&mut self, ctx: &egui::Context) {
        let navigator = &mut self.shell.navigator;

        if navigator.layout() == Layout::Main {
            egui::TopBottomPanel::bottom("tabs").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let active = navigator.active_tab();
                    for tab in Tab::ALL {
                        if ui.selectable_label(active == tab, tab.title()).clicked() && tab != active {
                            navigator.switch_tab(tab);
                        }
                    }
                });
            });
        }

        if navigator.depth() > 1 {
            egui::TopBottomPanel::top("back").show(ctx, |ui| {
                if ui.button("← Voltar").clicked() {
                    navigator.go_back();
                }
            });
        }
    }

    fn show_screen(&mut self, ctx: &egui::Context) {
        let services = &self.services;
        let shell = &mut self.shell;

        match shell.navigator.current().clone() {
            Route::AuthMenu => AuthMenuScreen::show(ctx, shell),
            Route::SignIn => SignInScreen::show(ctx, services, shell, &mut self.auth),
            Route::SignUp => SignUpScreen::show(ctx, services, shell, &mut self.auth),
            Route::TokenConfirm => ConfirmTokenScreen::show(ctx, services, shell, &mut self.auth),
            Route::InventoryHome => InventoryScreen::show(ctx, services, shell, &mut self.inventory),
            Route::Scanner => ScannerScreen::show(ctx, shell, &mut self.scanner),
            Route::Item { sku } => {
                if self.item.as_ref().map_or(true, |s| s.sku() != sku) {
                    self.item = Some(ItemState::load(&sku, ctx, services));
                }
                if let Some(state) = self.item.as_mut() {
                    ItemScreen::show(ctx, services, shell, state);
                }
            }
            Route::Edit { sku } => {
                if self.edit.as_ref().map_or(true, |s| s.sku() != sku) {
                    self.edit = Some(EditState::load(&sku, ctx, services));
                }
                if let Some(state) = self.edit.as_mut() {
                    EditScreen::show(ctx, services, shell, state);
                }
            }
            Route::Sell { sku } => {
                if self.sell.as_ref().map_or(true, |s| s.sku() != sku) {
                    self.sell = Some(SellState::load(&sku, ctx, services));
                }
                if let Some(state) = self.sell.as_mut() {
                    SellScreen::show(ctx, services, shell, state);
                }
            }
            Route::Profile => ProfileScreen::show(ctx, services, shell, &mut self.profile),
        }
    }
}

impl eframe::App for CantinhoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.auth.poll(&mut self.shell);
        self.shell.sync_layout();
        if let Some(route) = self.shell.navigator.take_focus() {
            self.on_focus(ctx, route);
        }

        self.show_chrome(ctx);
        self.show_screen(ctx);
        self.shell.toasts.show(ctx);
    }
}

fn create_app(config: Config) -> eframe::AppCreator<'static> {
    Box::new(move |_cc| Ok(Box::new(CantinhoApp::new(config)?)))
}

pub fn launch_gui(config: Config) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native("Cantinho", options, create_app(config))
}

#[cfg(target_os = "android")]
pub fn launch_gui_android(app: android_activity::AndroidApp) -> Result<(), eframe::Error> {
    let mut config = Config::from_env();
    if let Some(dir) = app.internal_data_path() {
        config.storage_path = dir.join("session.json");
    }

    let options = eframe::NativeOptions {
        android_app: Some(app),
        ..Default::default()
    };

    eframe::run_native("Cantinho", options, create_app(config))
}
