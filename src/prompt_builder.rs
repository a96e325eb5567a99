//! 提示词生成：用户档案 + 个性化检索提示词 + 用药管理提示词
//!
//! 生成的文本填入输入框，由用户发送后走正常路由。
//! 条件、药物、偏好均去重；偏好最多 MAX_PREFERENCES 项。

use serde::Serialize;

/// 偏好上限
pub const MAX_PREFERENCES: usize = 5;

/// 可选的就医偏好
pub const PRESET_ATTRIBUTES: &[&str] = &[
    "Holistic approach to care",
    "LGBTQIA+ affirming practice",
    "Minimal wait times",
    "Weekend/evening availability",
    "Telehealth options available",
    "Accepts new patients",
    "Multilingual staff",
    "Integrative medicine focus",
    "Patient-centered communication",
    "Evidence-based treatment",
    "Chronic pain management expertise",
    "Preventive care emphasis",
    "Collaborative care approach",
    "Cultural sensitivity",
    "Extended consultation time",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pharmacy {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// 当前用户档案（演示中固定）
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub address: String,
    pub insurance: String,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
    pub emergency_contact: EmergencyContact,
    pub preferred_pharmacy: Option<Pharmacy>,
}

impl UserProfile {
    pub fn demo() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            name: "John Doe".to_string(),
            age: 45,
            address: "New York, NY 10001".to_string(),
            insurance: "Blue Cross Blue Shield".to_string(),
            conditions: owned(&["Hypertension", "Type 2 Diabetes"]),
            medications: owned(&["Lisinopril 10mg", "Metformin 500mg"]),
            allergies: owned(&["Penicillin"]),
            emergency_contact: EmergencyContact {
                name: "Jane Doe".to_string(),
                phone: "(555) 123-4567".to_string(),
                relationship: "Spouse".to_string(),
            },
            preferred_pharmacy: Some(Pharmacy {
                name: "CVS Pharmacy".to_string(),
                address: "123 Main St, New York, NY 10001".to_string(),
                phone: "(555) 987-6543".to_string(),
            }),
        }
    }
}

/// 检索提示词的输入
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientInfo {
    pub name: String,
    pub age: String,
    pub location: String,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
    pub insurance: String,
    pub search_type: String,
    pub specialty: String,
    pub urgency: String,
    pub preferences: Vec<String>,
    pub additional_context: String,
}

/// 非空且不重复时加入
fn add_unique(list: &mut Vec<String>, item: &str) -> bool {
    let item = item.trim();
    if item.is_empty() || list.iter().any(|x| x == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

fn remove_item(list: &mut Vec<String>, item: &str) -> bool {
    let before = list.len();
    list.retain(|x| x != item);
    list.len() != before
}

impl PatientInfo {
    /// 用档案预填个人信息
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            age: profile.age.to_string(),
            location: profile.address.clone(),
            conditions: profile.conditions.clone(),
            medications: profile.medications.clone(),
            insurance: profile.insurance.clone(),
            ..Self::default()
        }
    }

    pub fn add_condition(&mut self, condition: &str) -> bool {
        add_unique(&mut self.conditions, condition)
    }

    pub fn remove_condition(&mut self, condition: &str) -> bool {
        remove_item(&mut self.conditions, condition)
    }

    pub fn add_medication(&mut self, medication: &str) -> bool {
        add_unique(&mut self.medications, medication)
    }

    pub fn remove_medication(&mut self, medication: &str) -> bool {
        remove_item(&mut self.medications, medication)
    }

    /// 已满 MAX_PREFERENCES 项或重复时返回 false
    pub fn add_preference(&mut self, preference: &str) -> bool {
        if self.preferences.len() >= MAX_PREFERENCES {
            return false;
        }
        add_unique(&mut self.preferences, preference)
    }

    pub fn remove_preference(&mut self, preference: &str) -> bool {
        remove_item(&mut self.preferences, preference)
    }
}

pub fn generate_personalized_prompt(info: &PatientInfo) -> String {
    format!(
        "I'm {}, a {}-year-old patient living in {}. I'm currently managing {} and taking {}. \
I have {} insurance and I'm looking for a {} specialist.\n\n\
My search is {} and I'm specifically looking for a provider who offers {}.\n\n\
{}\n\n\
Please help me find the most suitable healthcare provider based on my specific needs and circumstances.",
        info.name,
        info.age,
        info.location,
        info.conditions.join(", "),
        info.medications.join(", "),
        info.insurance,
        info.specialty,
        info.urgency,
        info.preferences.join(", "),
        info.additional_context,
    )
}

/// 用药管理表单
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MedicationRequest {
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescribing_doctor: String,
    pub current_cost: String,
    pub refill_date: String,
    pub pharmacy: String,
    pub concerns: String,
}

fn joined_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

pub fn generate_medication_prompt(request: &MedicationRequest, profile: &UserProfile) -> String {
    let pharmacy_location = profile
        .preferred_pharmacy
        .as_ref()
        .map(|p| p.address.as_str())
        .unwrap_or("Not specified");
    format!(
        "Medication management request for {name}:\n\n\
Patient Information:\n\
- Age: {age}\n\
- Current conditions: {conditions}\n\
- Current medications: {medications}\n\
- Allergies: {allergies}\n\
- Insurance: {insurance}\n\n\
Medication Details:\n\
- Name: {med}\n\
- Dosage: {dosage}\n\
- Frequency: {frequency}\n\
- Prescribing Doctor: {doctor}\n\
- Current Cost: ${cost}\n\
- Next Refill: {refill}\n\n\
Pharmacy Information:\n\
- Preferred Pharmacy: {pharmacy}\n\
- Location: {location}\n\n\
Patient Concerns: {concerns}\n\n\
Please analyze cost-saving opportunities, check for drug interactions with current medications, \
verify dosage appropriateness for patient age and conditions, and provide refill management recommendations.",
        name = profile.name,
        age = profile.age,
        conditions = joined_or_none(&profile.conditions),
        medications = joined_or_none(&profile.medications),
        allergies = joined_or_none(&profile.allergies),
        insurance = profile.insurance,
        med = request.medication_name,
        dosage = request.dosage,
        frequency = request.frequency,
        doctor = request.prescribing_doctor,
        cost = request.current_cost,
        refill = request.refill_date,
        pharmacy = request.pharmacy,
        location = pharmacy_location,
        concerns = request.concerns,
    )
}
