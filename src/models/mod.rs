//! Wire types for employees, attendance records, and dashboard stats.

pub mod attendance;
pub mod dashboard;
pub mod employee;

pub use attendance::{AttendanceRecord, AttendanceStatus, MarkAttendance};
pub use dashboard::DashboardStats;
pub use employee::{CreateEmployee, Employee};
