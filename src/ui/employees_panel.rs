//! Employee directory panel: list, search, add, and delete.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PLUS, TRASH};

use super::app::{App, DeleteTarget};
use super::components::{
    back_button, danger_action_button, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon,
};

/// Show the employees panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Employees");

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Employee").clicked() {
            app.state.directory.form.open();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_directory();
        }

        ui.add_space(20.0);

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.employee_search)
                .desired_width(200.0)
                .hint_text("Code or name..."),
        );

        if !app.employee_search.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.employee_search.clear();
            }
        }
    });

    ui.add_space(15.0);

    if app.state.directory.is_loading {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
        });
    } else if app.state.directory.employees.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label("No employees found. Add one to get started.");
        });
    } else {
        show_table(app, ui);
    }

    // Add dialog
    if app.state.directory.form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let needle = app.employee_search.to_lowercase();
    let filtered: Vec<_> = app
        .state
        .directory
        .employees
        .iter()
        .filter(|e| {
            needle.is_empty() || e.code.to_lowercase().contains(&needle) || e.full_name.to_lowercase().contains(&needle)
        })
        .collect();

    ui.label(format!(
        "Showing {} of {} employees",
        filtered.len(),
        app.state.directory.employees.len()
    ));

    ui.add_space(10.0);

    let mut pending_delete: Option<DeleteTarget> = None;

    ScrollArea::vertical().id_salt("employees_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("employees_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("ID");
                ui.strong("Name");
                ui.strong("Email");
                ui.strong("Department");
                ui.strong("Actions");
                ui.end_row();

                // Data rows, in the order the server returned them
                for emp in filtered {
                    ui.label(&emp.code);
                    ui.label(&emp.full_name);
                    ui.label(&emp.email);
                    ui.label(&emp.department);

                    if danger_action_button(ui, TRASH, "Delete").clicked() {
                        pending_delete = Some(DeleteTarget {
                            id: emp.id,
                            full_name: emp.full_name.clone(),
                        });
                    }

                    ui.end_row();
                }
            });
    });

    if let Some(target) = pending_delete {
        app.delete_target = Some(target);
        app.show_delete_confirm = true;
    }
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Add New Employee")
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("employee_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Employee ID:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.state.directory.form.code)
                            .desired_width(200.0)
                            .hint_text("E.g. EMP001"),
                    );
                    ui.end_row();

                    ui.label("Full Name:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.state.directory.form.full_name)
                            .desired_width(250.0)
                            .hint_text("John Doe"),
                    );
                    ui.end_row();

                    ui.label("Email:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.state.directory.form.email)
                            .desired_width(250.0)
                            .hint_text("john@example.com"),
                    );
                    ui.end_row();

                    ui.label("Department:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.state.directory.form.department)
                            .desired_width(200.0)
                            .hint_text("Engineering"),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.state.directory.form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save Employee").clicked() {
                        save_employee(app);
                    }
                });
            });
        });
}

/// Validate the form; only a valid form issues a request. The dialog stays
/// open until the creation succeeds.
fn save_employee(app: &mut App) {
    match app.state.directory.form.validate() {
        Ok(data) => app.create_employee(data),
        Err(msg) => app.state.notices.error(msg),
    }
}
