//! Employee wire types.
//!
//! The backend calls the human-readable code `employee_id`, which collides
//! with the attendance foreign key of the same name. Locally the code is
//! `code` and the foreign key is `employee_ref`; serde keeps the wire names.

use serde::{Deserialize, Serialize};

/// An employee record as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Server-assigned opaque identifier.
    pub id: i64,
    /// Human-readable employee code (e.g. "EMP001"), unique and immutable.
    #[serde(rename = "employee_id")]
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Payload for creating an employee. All fields are required non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployee {
    #[serde(rename = "employee_id")]
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_wire_field_names() {
        let json = r#"{"id":7,"employee_id":"EMP001","full_name":"Jane Doe","email":"jane@x.com","department":"Engineering"}"#;
        let emp: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(emp.id, 7);
        assert_eq!(emp.code, "EMP001");
        assert_eq!(emp.full_name, "Jane Doe");
    }

    #[test]
    fn test_create_employee_serializes_code_as_employee_id() {
        let payload = CreateEmployee {
            code: "EMP002".to_string(),
            full_name: "John Smith".to_string(),
            email: "john@x.com".to_string(),
            department: "Sales".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["employee_id"], "EMP002");
        assert!(json.get("code").is_none());
    }
}
