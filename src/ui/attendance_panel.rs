//! Attendance panel: employee selection, history table, mark dialog.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CALENDAR_BLANK, PLUS};

use crate::models::AttendanceStatus;

use super::app::App;
use super::components::{back_button, colors, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon};

/// Show the attendance panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Attendance");

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Mark Attendance").clicked() {
            app.state.attendance.form.open();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_roster();
            if let Some(id) = app.state.attendance.selected {
                app.load_history(id);
            }
        }
    });

    ui.add_space(15.0);

    show_selector(app, ui);

    ui.add_space(15.0);

    if app.state.attendance.is_history_loading {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
        });
    } else if app.state.attendance.selected.is_none() {
        show_empty_state(
            ui,
            "No Employee Selected",
            "Select an employee above to view their attendance record.",
        );
    } else if app.state.attendance.records.is_empty() {
        show_empty_state(ui, "No Records", "No attendance records found for this employee.");
    } else {
        show_history_table(app, ui);
    }

    // Mark dialog
    if app.state.attendance.form.is_open {
        show_mark_dialog(app, ui.ctx());
    }

    go_back
}

/// Employee selection combo, populated from this panel's roster snapshot.
fn show_selector(app: &mut App, ui: &mut Ui) {
    let mut new_selection: Option<Option<i64>> = None;

    ui.horizontal(|ui| {
        ui.label("Employee:");

        let selected_text = app
            .state
            .attendance
            .selected
            .and_then(|id| app.state.attendance.roster.iter().find(|e| e.id == id))
            .map(|e| format!("{} ({})", e.full_name, e.code))
            .unwrap_or_else(|| "Select an employee to view history...".to_string());

        egui::ComboBox::from_id_salt("attendance_employee_filter")
            .width(320.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(app.state.attendance.selected.is_none(), "None")
                    .clicked()
                {
                    new_selection = Some(None);
                }
                for emp in &app.state.attendance.roster {
                    let label = format!("{} ({})", emp.full_name, emp.code);
                    if ui
                        .selectable_label(app.state.attendance.selected == Some(emp.id), label)
                        .clicked()
                    {
                        new_selection = Some(Some(emp.id));
                    }
                }
            });

        if app.state.attendance.is_roster_loading {
            ui.add_space(10.0);
            ui.spinner();
        }
    });

    if let Some(selection) = new_selection {
        app.select_employee(selection);
    }
}

fn show_empty_state(ui: &mut Ui, title: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(CALENDAR_BLANK).size(36.0).weak());
        ui.add_space(5.0);
        ui.label(RichText::new(title).size(16.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(detail).weak());
    });
}

fn show_history_table(app: &mut App, ui: &mut Ui) {
    ScrollArea::vertical().id_salt("attendance_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("attendance_grid")
            .num_columns(3)
            .striped(true)
            .min_col_width(100.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Date");
                ui.strong("Status");
                ui.strong("Employee");
                ui.end_row();

                // Rows, in the order the server returned them
                for record in &app.state.attendance.records {
                    ui.label(record.date.format("%Y-%m-%d").to_string());

                    let color = match record.status {
                        AttendanceStatus::Present => colors::SUCCESS,
                        AttendanceStatus::Absent => colors::ERROR,
                    };
                    ui.colored_label(color, record.status.label());

                    ui.label(app.state.attendance.resolve_name(record.employee_ref));
                    ui.end_row();
                }
            });
    });
}

fn show_mark_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Mark Attendance")
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            let mut picked_employee: Option<i64> = None;

            egui::Grid::new("mark_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Employee:");
                    let selected_text = app
                        .state
                        .attendance
                        .form
                        .employee_ref
                        .and_then(|id| app.state.attendance.roster.iter().find(|e| e.id == id))
                        .map(|e| e.full_name.clone())
                        .unwrap_or_else(|| "Select Employee".to_string());

                    egui::ComboBox::from_id_salt("mark_form_employee")
                        .width(220.0)
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            for emp in &app.state.attendance.roster {
                                if ui
                                    .selectable_label(
                                        app.state.attendance.form.employee_ref == Some(emp.id),
                                        &emp.full_name,
                                    )
                                    .clicked()
                                {
                                    picked_employee = Some(emp.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Date:");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.state.attendance.form.date)
                            .id_salt("mark_form_date"),
                    );
                    ui.end_row();

                    ui.label("Status:");
                    egui::ComboBox::from_id_salt("mark_form_status")
                        .width(150.0)
                        .selected_text(app.state.attendance.form.status.label())
                        .show_ui(ui, |ui| {
                            for status in [AttendanceStatus::Present, AttendanceStatus::Absent] {
                                ui.selectable_value(&mut app.state.attendance.form.status, status, status.label());
                            }
                        });
                    ui.end_row();
                });

            if let Some(id) = picked_employee {
                app.state.attendance.form.employee_ref = Some(id);
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.state.attendance.form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_mark(app);
                    }
                });
            });
        });
}

/// Reject a mark with no employee locally; no request is made. The dialog
/// stays open until the mark succeeds.
fn save_mark(app: &mut App) {
    match app.state.attendance.form.validate() {
        Ok(data) => app.mark_attendance(data),
        Err(msg) => app.state.notices.error(msg),
    }
}
