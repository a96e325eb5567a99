//! 演示用静态数据：医生检索结果、用药清单与 Humira 的固定回复

use chrono::{Duration, Local};

use super::data::{CostSaving, Medication, MedicationPayload, ProviderResult, Reminder};

/// 询问 Humira 时的固定助手回复（演示脚本也使用同一段文字）
pub const HUMIRA_RESPONSE: &str = "I understand how frustrating and stressful that must be. High medication costs are a huge burden. Please know that you're not alone in this, and I'm here to help. Let's look at some options together. I'm pulling up some research on manufacturer discounts and patient assistance programs right now.";

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=60&width=60";

#[allow(clippy::too_many_arguments)]
fn provider(
    id: &str,
    name: &str,
    rating: f32,
    location: &str,
    distance: &str,
    availability: &str,
    insurance: &[&str],
    image_ref: &str,
    ai_summary: &str,
) -> ProviderResult {
    ProviderResult {
        id: id.to_string(),
        name: name.to_string(),
        specialty: "Rheumatology".to_string(),
        rating,
        review_count: 8,
        location: location.to_string(),
        distance_label: distance.to_string(),
        availability_label: availability.to_string(),
        accepted_insurance: insurance.iter().map(|s| s.to_string()).collect(),
        image_ref: image_ref.to_string(),
        ai_summary: ai_summary.to_string(),
    }
}

/// 固定顺序的 4 位风湿科医生
pub fn providers() -> Vec<ProviderResult> {
    vec![
        provider(
            "1",
            "Dr. Seung Yoon Celine Lee, MD",
            4.8,
            "Lotus Rheumatology and Wellness Clinic, 166 E 5900 S B111, Murray, UT 84107",
            "7.2 miles",
            "Next available: Tomorrow 2:00 PM",
            &["Blue Cross", "Aetna", "Cigna", "United Healthcare"],
            "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/profile-EXaOVHN2gGQjlkNlQTJcrfGzoWMuSU.png",
            "Board-certified rheumatologist with over 23 years of experience in integrative and lifestyle medicine. Runs a direct-pay concierge practice combining Western and Eastern traditions, including medical acupuncture. Patients praise thorough 75-minute consultations; the concierge model is noted as an investment.",
        ),
        provider(
            "2",
            "Dr. Jane Alexandra Nguyen, MD",
            4.9,
            "389 S 900 E, Salt Lake City, UT 84102",
            "12.8 miles",
            "Next available: Friday 10:00 AM",
            &["United Healthcare", "Blue Cross", "Medicare"],
            PLACEHOLDER_IMAGE,
            "Highly-rated Salt Lake City rheumatologist specializing in ultrasound-guided procedures and lupus research. Reviews highlight extensive knowledge, excellent bedside manner and early, accurate diagnoses in an LGBTQIA+ friendly practice.",
        ),
        provider(
            "3",
            "Dr. Richard Albert Gremillion, MD",
            4.3,
            "800 E 9400 S, Sandy, UT 84094",
            "4.5 miles",
            "Next available: Monday 9:00 AM",
            &["Aetna", "Cigna", "Medicaid"],
            PLACEHOLDER_IMAGE,
            "Salt Lake Valley rheumatologist affiliated with Lone Peak Hospital who volunteers at local clinics and leads community screening for early rheumatoid arthritis. Patients describe him as patient and respectful, though appointments can be hard to schedule.",
        ),
        provider(
            "4",
            "Dr. David Jonathan Smith, MD",
            3.0,
            "1121 E 3900 S Ste 125, Salt Lake City, UT 84124",
            "8.2 miles",
            "Next available: Next week",
            &["Blue Cross", "Aetna"],
            PLACEHOLDER_IMAGE,
            "Salt Lake City rheumatologist with a focus on traditional treatment approaches. Feedback is mixed on communication style and appointment availability.",
        ),
    ]
}

/// 两种药物 + 一条提醒，时间相对于当前时刻
pub fn medication_bundle() -> MedicationPayload {
    let now = Local::now();
    let metformin_due = now + Duration::minutes(30);

    MedicationPayload {
        current_medications: vec![
            Medication {
                id: "1".to_string(),
                name: "Lisinopril 10mg".to_string(),
                dosage: "Once daily".to_string(),
                next_due: now + Duration::hours(2),
                refills_remaining: 2,
                needs_refill: false,
                cost_saving: Some(CostSaving {
                    current_cost: 45.99,
                    potential_savings: 23.5,
                    suggestion: "Generic alternative available".to_string(),
                }),
            },
            Medication {
                id: "2".to_string(),
                name: "Metformin 500mg".to_string(),
                dosage: "Twice daily with meals".to_string(),
                next_due: metformin_due,
                refills_remaining: 0,
                needs_refill: true,
                cost_saving: None,
            },
        ],
        reminders: vec![Reminder {
            id: "1".to_string(),
            medication_id: "2".to_string(),
            time: metformin_due,
            message: "Time to take Metformin 500mg".to_string(),
        }],
    }
}
