//! Unauthenticated stack: menu, sign in, sign up and SMS code confirmation.

use cantinho_client::session::{
    accept_phone_input, is_valid_phone, ConfirmTokenForm, SignInForm, SignUpForm, CODE_LENGTH,
};
use cantinho_client::{ApiResult, Route};
use eframe::egui;

use crate::ui::state::{Services, Shell};
use crate::ui::task::{Pending, TaskPoll};

enum AuthRequest {
    SignIn(Pending<ApiResult<String>>),
    SignUp {
        phone: String,
        pending: Pending<ApiResult<()>>,
    },
    Confirm(Pending<ApiResult<String>>),
}

#[derive(Default)]
pub struct AuthState {
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
    pub confirm: ConfirmTokenForm,
    /// Phone typed on the confirm screen when none is pending
    pub confirm_phone: String,
    request: Option<AuthRequest>,
}

impl AuthState {
    pub fn is_busy(&self) -> bool {
        self.request.is_some()
    }

    /// Applies a finished auth request to the session and routes on.
    pub fn poll(&mut self, shell: &mut Shell) {
        let Some(request) = self.request.as_mut() else {
            return;
        };

        match request {
            AuthRequest::SignIn(pending) => match pending.poll() {
                TaskPoll::Waiting => return,
                TaskPoll::Lost => {}
                TaskPoll::Ready(result) => {
                    if let Err(e) = shell.session.finish_sign_in(result) {
                        shell.toasts.error(e.user_message());
                        if let Some(route) = e.redirect() {
                            shell.navigator.pop_to_top();
                            shell.push(route);
                        }
                    } else {
                        self.sign_in = SignInForm::default();
                    }
                }
            },
            AuthRequest::SignUp { phone, pending } => match pending.poll() {
                TaskPoll::Waiting => return,
                TaskPoll::Lost => {}
                TaskPoll::Ready(result) => match shell.session.finish_sign_up(phone, result) {
                    Ok(()) => {
                        self.sign_up = SignUpForm::default();
                        shell.navigator.pop_to_top();
                        shell.push(Route::TokenConfirm);
                    }
                    Err(e) => {
                        shell.toasts.error(e.user_message());
                        if let Some(route) = e.redirect() {
                            shell.navigator.pop_to_top();
                            shell.push(route);
                        }
                    }
                },
            },
            AuthRequest::Confirm(pending) => match pending.poll() {
                TaskPoll::Waiting => return,
                TaskPoll::Lost => {}
                TaskPoll::Ready(result) => {
                    if let Err(e) = shell.session.finish_confirm(result) {
                        shell.toasts.error(e.user_message());
                        if let Some(route) = e.redirect() {
                            shell.navigator.pop_to_top();
                            shell.push(route);
                        }
                    } else {
                        self.confirm = ConfirmTokenForm::default();
                    }
                }
            },
        }
        self.request = None;
    }

    fn submit_sign_in(&mut self, ctx: &egui::Context, services: &Services, shell: &mut Shell) {
        match shell.session.begin_sign_in(&self.sign_in) {
            Ok(credentials) => {
                let api = services.api.clone();
                self.request = Some(AuthRequest::SignIn(Pending::spawn(
                    &services.runtime,
                    ctx,
                    async move { api.sign_in(&credentials).await },
                )));
            }
            Err(e) => shell.toasts.error(e.user_message()),
        }
    }

    fn submit_sign_up(&mut self, ctx: &egui::Context, services: &Services, shell: &mut Shell) {
        match shell.session.begin_sign_up(&self.sign_up) {
            Ok(credentials) => {
                let api = services.api.clone();
                let phone = credentials.phone.clone();
                self.request = Some(AuthRequest::SignUp {
                    phone,
                    pending: Pending::spawn(&services.runtime, ctx, async move {
                        api.sign_up(&credentials).await
                    }),
                });
            }
            Err(e) => shell.toasts.error(e.user_message()),
        }
    }

    fn submit_confirm(&mut self, ctx: &egui::Context, services: &Services, shell: &mut Shell) {
        match shell.session.begin_confirm(&self.confirm) {
            Ok(request) => {
                let api = services.api.clone();
                self.request = Some(AuthRequest::Confirm(Pending::spawn(
                    &services.runtime,
                    ctx,
                    async move { api.verify_token(&request).await },
                )));
            }
            Err(e) => {
                shell.toasts.error(e.user_message());
                if let Some(route) = e.redirect() {
                    shell.navigator.pop_to_top();
                    shell.push(route);
                }
            }
        }
    }
}

/// Phone field that only takes digits, up to eleven of them
fn phone_field(ui: &mut egui::Ui, phone: &mut String) {
    let mut text = phone.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .hint_text("Telefone (DDD + número)")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        accept_phone_input(phone, &text);
    }
}

fn password_field(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .password(true)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
}

fn submit_pressed(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

pub struct AuthMenuScreen;

impl AuthMenuScreen {
    pub fn show(ctx: &egui::Context, shell: &mut Shell) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                ui.heading("Cantinho");
                ui.label("Controle de estoque e vendas");
                ui.add_space(30.0);

                if ui.button("Entrar").clicked() {
                    shell.push(Route::SignIn);
                }
                ui.add_space(10.0);
                if ui.button("Cadastrar").clicked() {
                    shell.push(Route::SignUp);
                }
                ui.add_space(10.0);
                if ui.button("Já tenho um código").clicked() {
                    shell.push(Route::TokenConfirm);
                }
            });
        });
    }
}

pub struct SignInScreen;

impl SignInScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut AuthState) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Entrar");
            ui.add_space(10.0);

            phone_field(ui, &mut state.sign_in.phone);
            let password = password_field(ui, &mut state.sign_in.password, "Senha");
            ui.add_space(10.0);

            let enabled = state.sign_in.can_submit() && !state.is_busy();
            let clicked = ui
                .add_enabled(enabled, egui::Button::new("Entrar"))
                .clicked();
            if enabled && (clicked || submit_pressed(ui, &password)) {
                state.submit_sign_in(ctx, services, shell);
            }
            if !state.sign_in.can_submit() {
                ui.weak("Preencha os dados acima");
            }
            if state.is_busy() {
                ui.spinner();
            }

            ui.add_space(20.0);
            if ui.link("Ainda não tem conta? Cadastre-se").clicked() {
                shell.navigator.pop_to_top();
                shell.push(Route::SignUp);
            }
        });
    }
}

pub struct SignUpScreen;

impl SignUpScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut AuthState) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Cadastrar");
            ui.add_space(10.0);

            phone_field(ui, &mut state.sign_up.phone);
            password_field(ui, &mut state.sign_up.password, "Senha");
            let confirm = password_field(ui, &mut state.sign_up.confirm_password, "Confirmar senha");

            let form = &state.sign_up;
            if !form.confirm_password.is_empty() && form.password != form.confirm_password {
                ui.colored_label(ui.visuals().error_fg_color, "As senhas não conferem.");
            }
            ui.add_space(10.0);

            let enabled = state.sign_up.can_submit() && !state.is_busy();
            let clicked = ui
                .add_enabled(enabled, egui::Button::new("Cadastrar"))
                .clicked();
            if enabled && (clicked || submit_pressed(ui, &confirm)) {
                state.submit_sign_up(ctx, services, shell);
            }
            if state.is_busy() {
                ui.spinner();
            }
        });
    }
}

pub struct ConfirmTokenScreen;

impl ConfirmTokenScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut AuthState) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Confirmar telefone");
            ui.add_space(10.0);

            match shell.session.pending_phone().map(str::to_string) {
                Some(phone) => {
                    ui.label(format!("Digite o código enviado por SMS para {phone}."));
                }
                None => {
                    ui.label("Informe o telefone que recebeu o código.");
                    phone_field(ui, &mut state.confirm_phone);
                    if is_valid_phone(&state.confirm_phone) {
                        shell.session.expect_confirmation(&state.confirm_phone);
                        state.confirm_phone.clear();
                    }
                }
            }
            ui.add_space(10.0);

            let mut code = state.confirm.code.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut code)
                    .hint_text("Código")
                    .char_limit(CODE_LENGTH)
                    .desired_width(120.0),
            );
            if response.changed() {
                state.confirm.code = code;
            }

            let enabled = state.confirm.can_submit() && !state.is_busy();
            let clicked = ui
                .add_enabled(enabled, egui::Button::new("Confirmar"))
                .clicked();
            if enabled && (clicked || submit_pressed(ui, &response)) {
                state.submit_confirm(ctx, services, shell);
            }
            if state.is_busy() {
                ui.spinner();
            }
        });
    }
}
