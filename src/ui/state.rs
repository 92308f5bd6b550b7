//! View state containers and the message pump that mutates them.
//!
//! Each panel owns one state container. Async task outcomes arrive as
//! [`UiMessage`] values over the app channel and are applied here in
//! completion order; applying a message may request a follow-up fetch via
//! [`Effect`], which the app shell turns into a spawned task. The view layer
//! only reads these containers and opens/edits the forms.

use chrono::{DateTime, Local, NaiveDate};

use crate::models::{AttendanceRecord, AttendanceStatus, CreateEmployee, DashboardStats, Employee, MarkAttendance};

/// Messages from async tasks to UI.
#[derive(Debug)]
pub enum UiMessage {
    // Employee directory
    DirectoryLoaded(Vec<Employee>),
    DirectoryLoadFailed(String),
    EmployeeCreated(Employee),
    EmployeeCreateFailed(String),
    EmployeeDeleted(i64),
    EmployeeDeleteFailed(String),

    // Attendance
    RosterLoaded(Vec<Employee>),
    RosterLoadFailed(String),
    HistoryLoaded(Vec<AttendanceRecord>),
    AttendanceMarked(AttendanceRecord),
    AttendanceMarkFailed(String),

    // Dashboard
    StatsLoaded(DashboardStats),
    StatsLoadFailed(String),
}

/// Follow-up fetch requested by applying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Re-fetch the directory's employee list.
    ReloadDirectory,
    /// Re-fetch one employee's attendance history.
    ReloadHistory(i64),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Transient notifications plus the activity log.
#[derive(Default)]
pub struct Notifications {
    pub success: Option<String>,
    pub error: Option<String>,
    pub log: Vec<LogEntry>,
}

impl Notifications {
    fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 entries
        if self.log.len() > 100 {
            self.log.remove(0);
        }
    }

    /// Record an informational log entry (no dialog).
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    /// Show a success notification and log it.
    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.success = Some(message.clone());
        self.push(LogLevel::Success, message);
    }

    /// Show an error notification and log it.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(message.clone());
        self.push(LogLevel::Error, message);
    }
}

/// Form state for adding an employee.
#[derive(Default, Clone)]
pub struct EmployeeForm {
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub is_open: bool,
}

impl EmployeeForm {
    /// Open the dialog with empty fields.
    pub fn open(&mut self) {
        *self = Self {
            is_open: true,
            ..Self::default()
        };
    }

    /// Reset the form to its closed empty default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate required fields and build the creation payload.
    ///
    /// All four fields must be non-empty; no request is made otherwise.
    pub fn validate(&self) -> Result<CreateEmployee, String> {
        if self.code.trim().is_empty() {
            return Err("Employee ID is required".to_string());
        }
        if self.full_name.trim().is_empty() {
            return Err("Full name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if self.department.trim().is_empty() {
            return Err("Department is required".to_string());
        }

        Ok(CreateEmployee {
            code: self.code.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
        })
    }
}

/// Form state for marking attendance.
#[derive(Clone)]
pub struct AttendanceForm {
    pub employee_ref: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub is_open: bool,
}

impl Default for AttendanceForm {
    fn default() -> Self {
        Self {
            employee_ref: None,
            date: Local::now().date_naive(),
            status: AttendanceStatus::default(),
            is_open: false,
        }
    }
}

impl AttendanceForm {
    /// Open the dialog with defaults: no employee, today's date, Present.
    pub fn open(&mut self) {
        *self = Self {
            is_open: true,
            ..Self::default()
        };
    }

    /// Reset the form to its closed defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and build the mark payload. An employee must be selected;
    /// date and status always hold valid values.
    pub fn validate(&self) -> Result<MarkAttendance, String> {
        let employee_ref = self.employee_ref.ok_or_else(|| "Please select an employee".to_string())?;

        Ok(MarkAttendance {
            employee_ref,
            date: self.date,
            status: self.status,
        })
    }
}

/// Employee directory view state.
#[derive(Default)]
pub struct DirectoryState {
    /// Last successfully fetched list, in store order.
    pub employees: Vec<Employee>,
    pub is_loading: bool,
    pub form: EmployeeForm,
}

impl DirectoryState {
    /// Mark a list fetch as in flight.
    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }
}

/// Attendance view state.
///
/// Holds its own roster snapshot, fetched independently of the directory's
/// list; the two are separate point-in-time copies and may diverge.
#[derive(Default)]
pub struct AttendanceState {
    pub roster: Vec<Employee>,
    pub records: Vec<AttendanceRecord>,
    pub selected: Option<i64>,
    pub is_roster_loading: bool,
    pub is_history_loading: bool,
    pub form: AttendanceForm,
}

impl AttendanceState {
    /// Mark a roster fetch as in flight.
    pub fn begin_roster_load(&mut self) {
        self.is_roster_loading = true;
    }

    /// Mark a history fetch as in flight.
    pub fn begin_history_load(&mut self) {
        self.is_history_loading = true;
    }

    /// Change the employee selection. A concrete selection requests a
    /// history fetch; clearing it empties the table with no request.
    pub fn select(&mut self, selection: Option<i64>) -> Option<Effect> {
        self.selected = selection;
        match selection {
            Some(id) => Some(Effect::ReloadHistory(id)),
            None => {
                self.records.clear();
                None
            }
        }
    }

    /// Display name for an employee ref, resolved against the roster
    /// snapshot.
    pub fn resolve_name(&self, employee_ref: i64) -> &str {
        self.roster
            .iter()
            .find(|e| e.id == employee_ref)
            .map(|e| e.full_name.as_str())
            .unwrap_or("Unknown")
    }
}

/// Dashboard view state.
#[derive(Default)]
pub struct DashboardState {
    pub stats: DashboardStats,
    pub is_loading: bool,
}

impl DashboardState {
    /// Mark a stats fetch as in flight.
    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }
}

/// All view state, mutated only through [`UiState::apply`] and the
/// panel-entry `begin_*` markers.
#[derive(Default)]
pub struct UiState {
    pub directory: DirectoryState,
    pub attendance: AttendanceState,
    pub dashboard: DashboardState,
    pub notices: Notifications,
}

impl UiState {
    /// Apply one completed task outcome. Returns the follow-up fetch to
    /// issue, if any.
    pub fn apply(&mut self, msg: UiMessage) -> Option<Effect> {
        match msg {
            UiMessage::DirectoryLoaded(employees) => {
                self.directory.employees = employees;
                self.directory.is_loading = false;
                None
            }
            UiMessage::DirectoryLoadFailed(msg) => {
                // Previous list stays as-is
                self.directory.is_loading = false;
                self.notices.error(msg);
                None
            }
            UiMessage::EmployeeCreated(emp) => {
                // No optimistic insert; the refetch brings the new row in
                self.notices.success(format!("Employee '{}' added successfully", emp.full_name));
                self.directory.form.reset();
                Some(Effect::ReloadDirectory)
            }
            UiMessage::EmployeeCreateFailed(msg) => {
                // Dialog stays open with the entered values
                self.notices.error(msg);
                None
            }
            UiMessage::EmployeeDeleted(_id) => {
                self.notices.success("Employee deleted successfully");
                Some(Effect::ReloadDirectory)
            }
            UiMessage::EmployeeDeleteFailed(msg) => {
                self.notices.error(msg);
                None
            }
            UiMessage::RosterLoaded(employees) => {
                self.attendance.roster = employees;
                self.attendance.is_roster_loading = false;
                None
            }
            UiMessage::RosterLoadFailed(msg) => {
                self.attendance.is_roster_loading = false;
                self.notices.error(msg);
                None
            }
            UiMessage::HistoryLoaded(records) => {
                // Empty history is a normal outcome, never an error
                self.attendance.records = records;
                self.attendance.is_history_loading = false;
                None
            }
            UiMessage::AttendanceMarked(record) => {
                self.notices.success("Attendance marked successfully");
                self.attendance.form.reset();

                // Refresh the visible table only when it shows the marked
                // employee
                if self.attendance.selected == Some(record.employee_ref) {
                    Some(Effect::ReloadHistory(record.employee_ref))
                } else {
                    None
                }
            }
            UiMessage::AttendanceMarkFailed(msg) => {
                self.notices.error(msg);
                None
            }
            UiMessage::StatsLoaded(stats) => {
                self.dashboard.stats = stats;
                self.dashboard.is_loading = false;
                None
            }
            UiMessage::StatsLoadFailed(msg) => {
                // Counters keep their pre-fetch values (zeros on first load)
                self.dashboard.is_loading = false;
                self.notices.error(msg);
                None
            }
        }
    }

    /// True while any fetch is outstanding; drives the repaint request.
    pub fn any_loading(&self) -> bool {
        self.directory.is_loading
            || self.attendance.is_roster_loading
            || self.attendance.is_history_loading
            || self.dashboard.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee(id: i64, code: &str, name: &str) -> Employee {
        Employee {
            id,
            code: code.to_string(),
            full_name: name.to_string(),
            email: format!("{code}@x.com"),
            department: "Engineering".to_string(),
        }
    }

    fn record(id: i64, employee_ref: i64, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_ref,
            date: date.parse::<NaiveDate>().unwrap(),
            status,
        }
    }

    #[test]
    fn test_directory_load_replaces_list_and_clears_loading() {
        let mut state = UiState::default();
        state.directory.begin_load();
        assert!(state.directory.is_loading);

        let effect = state.apply(UiMessage::DirectoryLoaded(vec![employee(1, "EMP001", "Jane Doe")]));

        assert_eq!(effect, None);
        assert!(!state.directory.is_loading);
        assert_eq!(state.directory.employees.len(), 1);
        assert_eq!(state.directory.employees[0].code, "EMP001");
    }

    #[test]
    fn test_directory_load_failure_keeps_previous_list() {
        let mut state = UiState::default();
        state.directory.employees = vec![employee(1, "EMP001", "Jane Doe")];
        state.directory.begin_load();

        state.apply(UiMessage::DirectoryLoadFailed("Failed to fetch employees".to_string()));

        assert!(!state.directory.is_loading);
        assert_eq!(state.directory.employees.len(), 1);
        assert_eq!(state.notices.error.as_deref(), Some("Failed to fetch employees"));
    }

    #[test]
    fn test_create_success_closes_dialog_and_requests_refetch() {
        let mut state = UiState::default();
        state.directory.form.open();
        state.directory.form.full_name = "Jane Doe".to_string();

        let effect = state.apply(UiMessage::EmployeeCreated(employee(1, "EMP001", "Jane Doe")));

        assert_eq!(effect, Some(Effect::ReloadDirectory));
        assert!(!state.directory.form.is_open);
        assert!(state.directory.form.full_name.is_empty());
        assert!(state.notices.success.is_some());
        // No optimistic insert
        assert!(state.directory.employees.is_empty());
    }

    #[test]
    fn test_create_failure_keeps_dialog_open_with_values() {
        let mut state = UiState::default();
        state.directory.form.open();
        state.directory.form.code = "EMP001".to_string();
        state.directory.form.email = "jane@x.com".to_string();

        let effect = state.apply(UiMessage::EmployeeCreateFailed("Email already registered".to_string()));

        assert_eq!(effect, None);
        assert!(state.directory.form.is_open);
        assert_eq!(state.directory.form.code, "EMP001");
        assert_eq!(state.notices.error.as_deref(), Some("Email already registered"));
    }

    #[test]
    fn test_delete_success_requests_refetch() {
        let mut state = UiState::default();
        state.directory.employees = vec![employee(1, "EMP001", "Jane Doe")];

        let effect = state.apply(UiMessage::EmployeeDeleted(1));

        assert_eq!(effect, Some(Effect::ReloadDirectory));
        assert!(state.notices.success.is_some());
    }

    #[test]
    fn test_employee_form_requires_all_fields() {
        let mut form = EmployeeForm::default();
        assert!(form.validate().is_err());

        form.code = "EMP001".to_string();
        form.full_name = "Jane Doe".to_string();
        form.email = "jane@x.com".to_string();
        assert_eq!(form.validate().unwrap_err(), "Department is required");

        form.department = "Engineering".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.code, "EMP001");
    }

    #[test]
    fn test_mark_form_defaults_and_required_employee() {
        let mut form = AttendanceForm::default();
        form.open();

        assert!(form.is_open);
        assert_eq!(form.status, AttendanceStatus::Present);
        assert_eq!(form.date, Local::now().date_naive());
        // No employee selected: reject before any request is made
        assert_eq!(form.validate().unwrap_err(), "Please select an employee");

        form.employee_ref = Some(12);
        let payload = form.validate().unwrap();
        assert_eq!(payload.employee_ref, 12);
        assert_eq!(payload.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_select_employee_requests_history_fetch() {
        let mut state = UiState::default();

        let effect = state.attendance.select(Some(7));

        assert_eq!(effect, Some(Effect::ReloadHistory(7)));
        assert_eq!(state.attendance.selected, Some(7));
    }

    #[test]
    fn test_clearing_selection_empties_history_without_fetch() {
        let mut state = UiState::default();
        state.attendance.selected = Some(7);
        state.attendance.records = vec![record(1, 7, "2024-01-10", AttendanceStatus::Present)];

        let effect = state.attendance.select(None);

        assert_eq!(effect, None);
        assert!(state.attendance.records.is_empty());
        assert_eq!(state.attendance.selected, None);
    }

    #[test]
    fn test_empty_history_is_silent() {
        let mut state = UiState::default();
        state.attendance.begin_history_load();

        let effect = state.apply(UiMessage::HistoryLoaded(Vec::new()));

        assert_eq!(effect, None);
        assert!(!state.attendance.is_history_loading);
        assert!(state.attendance.records.is_empty());
        assert!(state.notices.error.is_none());
    }

    #[test]
    fn test_mark_refreshes_history_only_for_selected_employee() {
        let mut state = UiState::default();
        state.attendance.selected = Some(7);

        let effect = state.apply(UiMessage::AttendanceMarked(record(
            1,
            7,
            "2024-01-10",
            AttendanceStatus::Present,
        )));
        assert_eq!(effect, Some(Effect::ReloadHistory(7)));
        assert!(!state.attendance.form.is_open);

        state.attendance.selected = Some(8);
        let effect = state.apply(UiMessage::AttendanceMarked(record(
            2,
            7,
            "2024-01-11",
            AttendanceStatus::Absent,
        )));
        assert_eq!(effect, None);
    }

    #[test]
    fn test_mark_failure_keeps_dialog_open() {
        let mut state = UiState::default();
        state.attendance.form.open();
        state.attendance.form.employee_ref = Some(7);

        let effect = state.apply(UiMessage::AttendanceMarkFailed("Failed to mark attendance".to_string()));

        assert_eq!(effect, None);
        assert!(state.attendance.form.is_open);
        assert_eq!(state.attendance.form.employee_ref, Some(7));
    }

    #[test]
    fn test_resolve_name_falls_back_to_unknown() {
        let mut state = UiState::default();
        state.attendance.roster = vec![employee(7, "EMP007", "Jane Doe")];

        assert_eq!(state.attendance.resolve_name(7), "Jane Doe");
        assert_eq!(state.attendance.resolve_name(99), "Unknown");
    }

    #[test]
    fn test_stats_failure_keeps_zero_counters() {
        let mut state = UiState::default();
        state.dashboard.begin_load();

        state.apply(UiMessage::StatsLoadFailed("Could not load dashboard statistics".to_string()));

        assert!(!state.dashboard.is_loading);
        assert_eq!(state.dashboard.stats.total_employees, 0);
        assert_eq!(state.dashboard.stats.present_today, 0);
        assert!(state.notices.error.is_some());
    }

    #[test]
    fn test_repeated_loads_are_idempotent() {
        let mut state = UiState::default();
        let list = vec![employee(1, "EMP001", "Jane Doe"), employee(2, "EMP002", "John Smith")];

        state.apply(UiMessage::DirectoryLoaded(list.clone()));
        state.apply(UiMessage::DirectoryLoaded(list.clone()));

        assert_eq!(state.directory.employees, list);
    }

    #[test]
    fn test_log_capped_at_100_entries() {
        let mut notices = Notifications::default();
        for i in 0..150 {
            notices.info(format!("entry {i}"));
        }

        assert_eq!(notices.log.len(), 100);
        assert_eq!(notices.log.last().unwrap().message, "entry 149");
    }
}
