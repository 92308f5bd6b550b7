//! Dashboard aggregate stats.

use serde::{Deserialize, Serialize};

/// Server-computed summary counters. Read-only; the zero default is what
/// the dashboard shows until (or unless) the fetch succeeds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub present_today: i64,
    pub absent_today: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserialize() {
        let json = r#"{"total_employees":5,"present_today":3,"absent_today":2}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.total_employees, 5);
        assert_eq!(stats.present_today, 3);
        assert_eq!(stats.absent_today, 2);
    }

    #[test]
    fn test_default_is_zeroed() {
        let stats = DashboardStats::default();
        assert_eq!(stats.total_employees, 0);
        assert_eq!(stats.present_today, 0);
        assert_eq!(stats.absent_today, 0);
    }
}
