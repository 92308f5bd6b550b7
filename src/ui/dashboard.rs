//! Dashboard panel with aggregate stats, navigation cards, and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{CALENDAR_CHECK, USERS};

use super::app::{App, Panel};
use super::components::dashboard_card;
use super::state::LogLevel;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("HRMS Lite").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Employee and Attendance Management").size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        if app.state.dashboard.is_loading {
            ui.add_space(20.0);
            ui.spinner();
            ui.add_space(20.0);
        } else {
            let stats = app.state.dashboard.stats;
            ui.horizontal(|ui| {
                let available = ui.available_width();
                let start_offset = ((available - 510.0) / 2.0).max(0.0);
                ui.add_space(start_offset);

                stat_card(
                    ui,
                    "Total Employees",
                    &stats.total_employees.to_string(),
                    "Registered staff members",
                );
                stat_card(ui, "Present Today", &stats.present_today.to_string(), "Marked present");
                stat_card(ui, "Absent Today", &stats.absent_today.to_string(), "Marked absent");
            });
        }

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 2.0;
        let spacing = 30.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            if dashboard_card(ui, "Manage Employees", "Add or remove staff members", USERS, card_size).clicked() {
                next_panel = Some(Panel::Employees);
            }

            ui.add_space(spacing);

            if dashboard_card(
                ui,
                "Track Attendance",
                "Mark daily attendance and view history",
                CALENDAR_CHECK,
                card_size,
            )
            .clicked()
            {
                next_panel = Some(Panel::Attendance);
            }
        });

        ui.add_space(30.0);
    });

    // Two-column layout: Quick Actions | Recent Activity
    let available_width = ui.available_width();
    let column_width = (available_width - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(10.0);

        // Left column - Quick Actions
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Quick Actions").strong());
                    ui.add_space(10.0);

                    if ui.button("Refresh Stats").clicked() {
                        app.load_stats();
                    }

                    ui.add_space(5.0);

                    if ui.button("Add Employee").clicked() {
                        app.state.directory.form.open();
                        next_panel = Some(Panel::Employees);
                    }

                    ui.add_space(5.0);

                    if ui.button("Mark Attendance").clicked() {
                        app.state.attendance.form.open();
                        next_panel = Some(Panel::Attendance);
                    }
                });
        });

        ui.add_space(20.0);

        // Right column - Recent Activity
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Recent Activity").strong());
                    ui.add_space(10.0);

                    ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                        if app.state.notices.log.is_empty() {
                            ui.label(RichText::new("No recent activity").weak());
                        } else {
                            for entry in app.state.notices.log.iter().rev().take(10) {
                                let color = match entry.level {
                                    LogLevel::Info => Color32::GRAY,
                                    LogLevel::Success => Color32::from_rgb(100, 200, 100),
                                    LogLevel::Error => Color32::from_rgb(230, 100, 100),
                                };

                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                            .small()
                                            .color(Color32::DARK_GRAY),
                                    );
                                    ui.label(RichText::new(&entry.message).color(color));
                                });
                            }
                        }
                    });
                });
        });
    });

    next_panel
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}
