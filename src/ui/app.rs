//! Main application: panel routing, async operation issuance, message pump.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, Align, Layout};
use tokio::sync::mpsc;

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::models::{CreateEmployee, MarkAttendance};

use super::components::colors;
use super::state::{Effect, UiMessage, UiState};
use super::{attendance_panel, dashboard, employees_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Employees,
    Attendance,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Employees => "Employees",
            Panel::Attendance => "Attendance",
        }
    }
}

/// Target for delete confirmation dialog.
#[derive(Clone)]
pub struct DeleteTarget {
    pub id: i64,
    pub full_name: String,
}

/// Main application state.
pub struct App {
    // Runtime and API client
    rt: tokio::runtime::Runtime,
    client: Arc<ApiClient>,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // View state containers
    pub state: UiState,

    // Client-side directory search
    pub employee_search: String,

    // Delete confirmation dialog
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,

    // Settings dialog
    pub settings_open: bool,
    pub settings_url_input: String,
    settings_test_rx: Option<mpsc::UnboundedReceiver<Result<(), String>>>,
    settings_test_status: Option<Result<(), String>>,

    // Configuration
    config: AppConfig,
    config_path: PathBuf,
}

impl App {
    pub fn new(client: ApiClient, config: AppConfig, config_path: PathBuf, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let settings_url_input = config.api.base_url.clone();

        let mut app = Self {
            rt,
            client: Arc::new(client),
            tx,
            rx,
            current_panel: Panel::default(),
            state: UiState::default(),
            employee_search: String::new(),
            show_delete_confirm: false,
            delete_target: None,
            settings_open: false,
            settings_url_input,
            settings_test_rx: None,
            settings_test_status: None,
            config,
            config_path,
        };

        // The app opens on the dashboard
        app.load_stats();

        app
    }

    /// Switch panels, issuing the target panel's fetch-on-entry loads.
    pub fn navigate(&mut self, panel: Panel) {
        self.current_panel = panel;
        match panel {
            Panel::Dashboard => self.load_stats(),
            Panel::Employees => self.load_directory(),
            Panel::Attendance => self.load_roster(),
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ReloadDirectory => self.load_directory(),
            Effect::ReloadHistory(id) => self.load_history(id),
        }
    }

    /// Fetch the directory's employee list.
    pub fn load_directory(&mut self) {
        self.state.directory.begin_load();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.list_employees().await {
                Ok(employees) => {
                    let _ = tx.send(UiMessage::DirectoryLoaded(employees));
                }
                Err(e) => {
                    tracing::error!("employee list fetch failed: {e}");
                    let _ = tx.send(UiMessage::DirectoryLoadFailed("Failed to fetch employees".to_string()));
                }
            }
        });
    }

    /// Create a new employee.
    pub fn create_employee(&mut self, data: CreateEmployee) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.create_employee(&data).await {
                Ok(emp) => {
                    let _ = tx.send(UiMessage::EmployeeCreated(emp));
                }
                Err(e) => {
                    tracing::warn!("employee create failed: {e}");
                    let _ = tx.send(UiMessage::EmployeeCreateFailed(
                        e.user_message("Failed to add employee"),
                    ));
                }
            }
        });
    }

    /// Delete an employee. Only called after interactive confirmation.
    pub fn delete_employee(&mut self, id: i64) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.delete_employee(id).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::EmployeeDeleted(id));
                }
                Err(e) => {
                    tracing::warn!("employee delete failed: {e}");
                    let _ = tx.send(UiMessage::EmployeeDeleteFailed("Failed to delete employee".to_string()));
                }
            }
        });
    }

    /// Fetch the attendance panel's own roster snapshot.
    pub fn load_roster(&mut self) {
        self.state.attendance.begin_roster_load();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.list_employees().await {
                Ok(employees) => {
                    let _ = tx.send(UiMessage::RosterLoaded(employees));
                }
                Err(e) => {
                    tracing::error!("roster fetch failed: {e}");
                    let _ = tx.send(UiMessage::RosterLoadFailed("Failed to fetch employees list".to_string()));
                }
            }
        });
    }

    /// Fetch one employee's attendance history. Any failure, not-found
    /// included, yields an empty history with no notification.
    pub fn load_history(&mut self, employee_ref: i64) {
        self.state.attendance.begin_history_load();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let records = match client.list_attendance(employee_ref).await {
                Ok(records) => records,
                Err(e) => {
                    if e.is_not_found() {
                        tracing::debug!("no attendance history for employee {employee_ref}");
                    } else {
                        tracing::warn!("attendance history fetch failed: {e}");
                    }
                    Vec::new()
                }
            };
            let _ = tx.send(UiMessage::HistoryLoaded(records));
        });
    }

    /// Change the attendance employee selection.
    pub fn select_employee(&mut self, selection: Option<i64>) {
        if let Some(effect) = self.state.attendance.select(selection) {
            self.run_effect(effect);
        }
    }

    /// Submit one attendance record.
    pub fn mark_attendance(&mut self, data: MarkAttendance) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.mark_attendance(&data).await {
                Ok(record) => {
                    let _ = tx.send(UiMessage::AttendanceMarked(record));
                }
                Err(e) => {
                    tracing::warn!("attendance mark failed: {e}");
                    let _ = tx.send(UiMessage::AttendanceMarkFailed(
                        e.user_message("Failed to mark attendance"),
                    ));
                }
            }
        });
    }

    /// Fetch the dashboard counters.
    pub fn load_stats(&mut self) {
        self.state.dashboard.begin_load();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.dashboard_stats().await {
                Ok(stats) => {
                    let _ = tx.send(UiMessage::StatsLoaded(stats));
                }
                Err(e) => {
                    tracing::error!("dashboard stats fetch failed: {e}");
                    let _ = tx.send(UiMessage::StatsLoadFailed(
                        "Could not load dashboard statistics".to_string(),
                    ));
                }
            }
        });
    }

    /// Start the settings-dialog connection test.
    fn test_api_connection(&mut self) {
        let url = self.settings_url_input.clone();
        if url.is_empty() {
            self.settings_test_status = Some(Err("URL is empty".to_string()));
            return;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.settings_test_rx = Some(rx);
        self.settings_test_status = None;
        let timeout = self.config.api.timeout();

        self.rt.spawn(async move {
            let result = match ApiClient::new(&url, timeout) {
                Ok(client) => match client.ping().await {
                    Ok(true) => Ok(()),
                    Ok(false) => Err("Server answered with an error status".to_string()),
                    Err(e) => Err(e.to_string()),
                },
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Persist the edited base URL and rebuild the client against it.
    fn save_api_settings(&mut self) {
        self.config.api.base_url = self.settings_url_input.trim_end_matches('/').to_string();

        match ApiClient::new(&self.config.api.base_url, self.config.api.timeout()) {
            Ok(client) => {
                self.client = Arc::new(client);
                self.state.notices.info(format!("API server set to {}", self.config.api.base_url));
            }
            Err(e) => {
                self.state.notices.error(format!("Failed to apply API settings: {e}"));
                return;
            }
        }

        if let Err(e) = self.config.save(&self.config_path) {
            tracing::error!("Failed to save config: {e}");
            self.state.notices.error("Failed to save configuration".to_string());
        }

        // Re-fetch whatever the current panel shows against the new server
        self.navigate(self.current_panel);
    }

    /// Poll async operation results, applying them in completion order.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            if let Some(effect) = self.state.apply(msg) {
                self.run_effect(effect);
            }
        }

        // Poll settings connection test
        if let Some(mut rx) = self.settings_test_rx.take() {
            match rx.try_recv() {
                Ok(result) => {
                    self.settings_test_status = Some(result);
                }
                Err(mpsc::error::TryRecvError::Empty) => {
                    self.settings_test_rx = Some(rx);
                }
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Channel closed, keep None
                }
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Settings", |ui| {
                    if ui.button("API Server").clicked() {
                        self.settings_open = true;
                        self.settings_url_input = self.config.api.base_url.clone();
                        self.settings_test_status = None;
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.colored_label(
                        colors::NEUTRAL,
                        format!("{} | Server: {}", self.current_panel.name(), self.config.api.base_url),
                    );

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.state.any_loading() {
                            ui.spinner();
                            ui.label("Loading...");
                        }
                    });
                });
            });
    }

    /// Render the API settings dialog.
    fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut open = true;
        egui::Window::new("API Server")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Base URL:");
                        ui.text_edit_singleline(&mut self.settings_url_input);
                        ui.end_row();
                    });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    let testing = self.settings_test_rx.is_some();
                    if ui.add_enabled(!testing, egui::Button::new("Test Connection")).clicked() {
                        self.test_api_connection();
                    }

                    ui.add_space(10.0);

                    if self.settings_test_rx.is_some() {
                        ui.spinner();
                        ui.label("Testing...");
                    } else if let Some(result) = &self.settings_test_status {
                        match result {
                            Ok(()) => {
                                ui.colored_label(colors::SUCCESS, "Connection successful!");
                            }
                            Err(e) => {
                                ui.colored_label(colors::ERROR, format!("Failed: {e}"));
                            }
                        }
                    }
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.settings_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() {
                            self.save_api_settings();
                            self.settings_open = false;
                        }
                    });
                });
            });

        if !open {
            self.settings_open = false;
        }
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.state.notices.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.state.notices.error = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.state.notices.success.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.state.notices.success = None;
                    }
                });
        }

        // Delete confirmation dialog; the request goes out only from here
        if self.show_delete_confirm
            && let Some(ref target) = self.delete_target.clone()
        {
            egui::Window::new("Delete Employee")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!("Are you sure you want to delete '{}'?", target.full_name));
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button("Delete").clicked() {
                            self.confirm_delete();
                            self.show_delete_confirm = false;
                        }
                    });
                });
        }
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            self.state.notices.info(format!("Deleting employee: {}", target.full_name));
            self.delete_employee(target.id);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply completed async results
        self.poll_async_results();

        // Request repaint while requests are outstanding
        if self.state.any_loading() || self.settings_test_rx.is_some() {
            ctx.request_repaint();
        }

        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Settings dialog
        self.show_settings_dialog(ctx);

        // Modal dialogs (error, success, delete confirmation)
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = dashboard::show(self, ui) {
                    self.navigate(next);
                }
            }
            Panel::Employees => {
                if employees_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
            Panel::Attendance => {
                if attendance_panel::show(self, ui) {
                    self.navigate(Panel::Dashboard);
                }
            }
        });
    }
}
