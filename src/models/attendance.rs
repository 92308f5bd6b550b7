//! Attendance wire types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Display label, identical to the wire encoding.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

/// One attendance record as returned by the server.
///
/// `employee_ref` carries the opaque `Employee::id`, not the human-readable
/// employee code, despite the `employee_id` wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(rename = "employee_id")]
    pub employee_ref: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Payload for marking one employee's attendance on a date.
///
/// The backend enforces no (employee, date) uniqueness; marking the same
/// day twice duplicates the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendance {
    #[serde(rename = "employee_id")]
    pub employee_ref: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(serde_json::to_string(&AttendanceStatus::Present).unwrap(), "\"Present\"");
        assert_eq!(serde_json::to_string(&AttendanceStatus::Absent).unwrap(), "\"Absent\"");

        let parsed: AttendanceStatus = serde_json::from_str("\"Absent\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Absent);
    }

    #[test]
    fn test_status_default_is_present() {
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Present);
    }

    #[test]
    fn test_record_wire_field_names() {
        let json = r#"{"id":3,"employee_id":12,"date":"2024-01-10","status":"Present"}"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.employee_ref, 12);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_mark_payload_date_format() {
        let payload = MarkAttendance {
            employee_ref: 12,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            status: AttendanceStatus::Present,
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["employee_id"], 12);
        assert_eq!(json["date"], "2024-01-10");
        assert_eq!(json["status"], "Present");
    }
}
