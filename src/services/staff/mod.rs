//! Staff service.

use crate::models::staff::Staff;
use crate::services::api::{ApiError, ScheduleApi};

pub struct StaffService<'a> {
    api: &'a dyn ScheduleApi,
}

impl<'a> StaffService<'a> {
    pub fn new(api: &'a dyn ScheduleApi) -> Self {
        Self { api }
    }

    /// Active staff, in backend order. Inactive members keep their visit
    /// history on the backend but get no row on the board.
    pub fn list(&self) -> Result<Vec<Staff>, ApiError> {
        let staff = self.api.staff()?;
        Ok(staff.into_iter().filter(|member| member.active).collect())
    }
}
