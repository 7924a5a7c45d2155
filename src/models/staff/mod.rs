// Staff module
// Caregiver records as served by the backend staff service

use serde::{Deserialize, Serialize};

use crate::models::visit::ServiceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Coordinator,
    Staff,
}

impl StaffRole {
    pub fn label(&self) -> &'static str {
        match self {
            StaffRole::Admin => "Admin",
            StaffRole::Coordinator => "Coordinator",
            StaffRole::Staff => "Staff",
        }
    }
}

/// A caregiver who can be assigned visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    #[serde(rename = "staff_id")]
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    /// Service categories this staff member is qualified for.
    #[serde(rename = "skill_types", default)]
    pub skills: Vec<ServiceKind>,
    /// Daily capacity in hours; overruns are surfaced, never blocked.
    pub max_hours_day: f64,
    pub hourly_rate: u32,
    #[serde(rename = "is_active", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Staff {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Staff name cannot be empty".to_string());
        }

        if self.max_hours_day <= 0.0 {
            return Err("Daily hour limit must be positive".to_string());
        }

        Ok(())
    }

    pub fn is_qualified_for(&self, service: ServiceKind) -> bool {
        self.skills.contains(&service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_staff() -> Staff {
        Staff {
            id: "s-1".to_string(),
            name: "Tanaka".to_string(),
            role: StaffRole::Staff,
            skills: vec![ServiceKind::PersonalCare, ServiceKind::Housework],
            max_hours_day: 8.0,
            hourly_rate: 1200,
            active: true,
        }
    }

    #[test]
    fn test_validate_success() {
        assert!(sample_staff().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut staff = sample_staff();
        staff.name = "   ".to_string();
        assert!(staff.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_hours() {
        let mut staff = sample_staff();
        staff.max_hours_day = 0.0;
        assert!(staff.validate().is_err());
    }

    #[test]
    fn test_qualification_check() {
        let staff = sample_staff();
        assert!(staff.is_qualified_for(ServiceKind::Housework));
        assert!(!staff.is_qualified_for(ServiceKind::IntensiveCare));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "staff_id": "s-7",
            "name": "Suzuki",
            "role": "coordinator",
            "skill_types": ["life_support"],
            "max_hours_day": 6.5,
            "hourly_rate": 1500
        }"#;
        let staff: Staff = serde_json::from_str(json).unwrap();
        assert_eq!(staff.role, StaffRole::Coordinator);
        assert!(staff.active, "active defaults to true when absent");
        assert_eq!(staff.skills, vec![ServiceKind::LifeSupport]);
    }
}
