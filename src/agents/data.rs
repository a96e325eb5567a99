//! 智能体数据：各类别最近一次产出的负载
//!
//! 每个类别一个槽位，新结果整体覆盖旧结果（不合并）。

use chrono::{DateTime, Local};
use serde::Serialize;

use super::AgentCategory;

/// 医生检索结果（对核心而言是不透明负载）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProviderResult {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// 0..=5
    pub rating: f32,
    pub review_count: u32,
    pub location: String,
    pub distance_label: String,
    pub availability_label: String,
    pub accepted_insurance: Vec<String>,
    pub image_ref: String,
    pub ai_summary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProviderSearchPayload {
    pub results: Vec<ProviderResult>,
    pub search_query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CostSaving {
    pub current_cost: f64,
    pub potential_savings: f64,
    pub suggestion: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub next_due: DateTime<Local>,
    pub refills_remaining: u32,
    pub needs_refill: bool,
    pub cost_saving: Option<CostSaving>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reminder {
    pub id: String,
    pub medication_id: String,
    pub time: DateTime<Local>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MedicationPayload {
    pub current_medications: Vec<Medication>,
    pub reminders: Vec<Reminder>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppointmentPayload {
    pub available_slots: Vec<DateTime<Local>>,
    pub selected_provider: Option<ProviderResult>,
}

/// 处理器产出的负载，按类别区分形状
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentPayload {
    ProviderSearch(ProviderSearchPayload),
    Medication(MedicationPayload),
    Appointment(AppointmentPayload),
}

impl AgentPayload {
    pub fn category(&self) -> AgentCategory {
        match self {
            AgentPayload::ProviderSearch(_) => AgentCategory::ProviderSearch,
            AgentPayload::Medication(_) => AgentCategory::Medication,
            AgentPayload::Appointment(_) => AgentCategory::Appointment,
        }
    }
}

/// 按类别存放最近一次负载
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AgentData {
    pub provider_search: Option<ProviderSearchPayload>,
    pub medication: Option<MedicationPayload>,
    pub appointment: Option<AppointmentPayload>,
}

impl AgentData {
    /// 写入负载，覆盖同类别旧值
    pub fn record(&mut self, payload: AgentPayload) {
        match payload {
            AgentPayload::ProviderSearch(p) => self.provider_search = Some(p),
            AgentPayload::Medication(p) => self.medication = Some(p),
            AgentPayload::Appointment(p) => self.appointment = Some(p),
        }
    }

    /// 在最近一次检索结果中按 id 查找
    pub fn find_provider(&self, id: &str) -> Option<&ProviderResult> {
        self.provider_search
            .as_ref()
            .and_then(|p| p.results.iter().find(|r| r.id == id))
    }

    pub fn has(&self, category: AgentCategory) -> bool {
        match category {
            AgentCategory::ProviderSearch => self.provider_search.is_some(),
            AgentCategory::Medication => self.medication.is_some(),
            AgentCategory::Appointment => self.appointment.is_some(),
            AgentCategory::General => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::mock;

    #[test]
    fn test_record_overwrites_not_merges() {
        let mut data = AgentData::default();
        data.record(AgentPayload::ProviderSearch(ProviderSearchPayload {
            results: mock::providers(),
            search_query: "first".into(),
        }));
        data.record(AgentPayload::ProviderSearch(ProviderSearchPayload {
            results: vec![],
            search_query: "second".into(),
        }));

        let p = data.provider_search.as_ref().unwrap();
        assert_eq!(p.search_query, "second");
        assert!(p.results.is_empty());
        assert!(!data.has(AgentCategory::Medication));
    }

    #[test]
    fn test_find_provider_in_last_results() {
        let mut data = AgentData::default();
        assert!(data.find_provider("1").is_none());

        data.record(AgentPayload::ProviderSearch(ProviderSearchPayload {
            results: mock::providers(),
            search_query: "q".into(),
        }));
        assert_eq!(data.find_provider("2").map(|p| p.rating), Some(4.9));
        assert!(data.find_provider("99").is_none());
    }
}
