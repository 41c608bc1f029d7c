//! Sample question set for the in-memory store.
//!
//! Eleven questions (five SBA, six MTF) so a fresh fallback instance has
//! something to quiz on. All carry rank 0 and are spaced five minutes apart
//! from 2024-01-01 10:00 UTC, so they list newest first until reordered.

use chrono::{Duration, TimeZone, Utc};
use quizbank_core::question::{AnswerOption, QuestionType, StoredOptions};
use sqlx::types::Json;

use crate::models::question::QuestionRow;

struct SampleQuestion {
    question_type: QuestionType,
    prompt: &'static str,
    options: [(&'static str, bool); 5],
    rationale: &'static str,
    category: &'static str,
}

const SAMPLES: [SampleQuestion; 11] = [
    SampleQuestion {
        question_type: QuestionType::Mtf,
        prompt: "Regarding the management of acute asthma:",
        options: [
            ("Salbutamol is a beta-blocker", false),
            ("Oxygen should be titrated to maintain saturation 94-98%", true),
            ("Oral prednisolone is indicated in all acute attacks", true),
            ("Magnesium sulfate is the first-line treatment", false),
            ("Peak flow measurement is useful for severity assessment", true),
        ],
        rationale: "Salbutamol is a beta-agonist. Oxygen targets are 94-98%. Steroids are key. \
                    Magnesium is for severe/life-threatening cases not responding to initial therapy.",
        category: "Respiratory",
    },
    SampleQuestion {
        question_type: QuestionType::Sba,
        prompt: "A 65-year-old man presents with crushing chest pain radiating to the left arm. \
                 ECG shows ST elevation in leads II, III, and aVF. Which coronary artery is most \
                 likely occluded?",
        options: [
            ("Left Anterior Descending (LAD)", false),
            ("Right Coronary Artery (RCA)", true),
            ("Left Circumflex (LCx)", false),
            ("Left Main Stem", false),
            ("Posterior Descending Artery", false),
        ],
        rationale: "ST elevation in inferior leads (II, III, aVF) indicates an inferior MI, most \
                    commonly caused by RCA occlusion.",
        category: "Cardiology",
    },
    SampleQuestion {
        question_type: QuestionType::Sba,
        prompt: "Which of the following is the first-line treatment for Type 2 Diabetes Mellitus \
                 in an overweight patient with normal renal function?",
        options: [
            ("Gliclazide", false),
            ("Insulin", false),
            ("Metformin", true),
            ("Pioglitazone", false),
            ("Sitagliptin", false),
        ],
        rationale: "Metformin is the first-line pharmacological therapy for T2DM, especially in \
                    overweight patients, provided eGFR is >30.",
        category: "Endocrinology",
    },
    SampleQuestion {
        question_type: QuestionType::Sba,
        prompt: "A 25-year-old female presents with a \"curtain coming down\" over her vision. \
                 Fundoscopy reveals a grey, elevated retina. What is the most likely diagnosis?",
        options: [
            ("Central Retinal Artery Occlusion", false),
            ("Retinal Detachment", true),
            ("Vitreous Haemorrhage", false),
            ("Acute Angle Closure Glaucoma", false),
            ("Optic Neuritis", false),
        ],
        rationale: "The description of a \"curtain\" and elevated grey retina is classic for \
                    Retinal Detachment.",
        category: "Ophthalmology",
    },
    SampleQuestion {
        question_type: QuestionType::Sba,
        prompt: "Which organism is the most common cause of Community Acquired Pneumonia?",
        options: [
            ("Staphylococcus aureus", false),
            ("Haemophilus influenzae", false),
            ("Mycoplasma pneumoniae", false),
            ("Streptococcus pneumoniae", true),
            ("Legionella pneumophila", false),
        ],
        rationale: "Streptococcus pneumoniae remains the most common cause of CAP worldwide.",
        category: "Respiratory",
    },
    SampleQuestion {
        question_type: QuestionType::Sba,
        prompt: "A 30-year-old woman presents with weight loss, heat intolerance, and \
                 palpitations. TSH is <0.01 mU/L and fT4 is elevated. TSH receptor antibodies \
                 are positive. What is the diagnosis?",
        options: [
            ("Toxic Multinodular Goitre", false),
            ("Graves' Disease", true),
            ("Hashimoto's Thyroiditis", false),
            ("De Quervain's Thyroiditis", false),
            ("Exogenous Thyroxine intake", false),
        ],
        rationale: "Positive TSH receptor antibodies (TRAb) are pathognomonic for Graves' Disease.",
        category: "Endocrinology",
    },
    SampleQuestion {
        question_type: QuestionType::Mtf,
        prompt: "Regarding Hyperkalemia:",
        options: [
            ("Peaked T waves are an early ECG sign", true),
            ("Calcium gluconate lowers serum potassium levels", false),
            ("Insulin/Dextrose shifts potassium into cells", true),
            ("Salbutamol nebs can be used as temporizing measure", true),
            ("Ramipril is a recognized cause", true),
        ],
        rationale: "Calcium gluconate stabilizes the myocardium but does not lower K+. \
                    Insulin/Dextrose and Salbutamol shift K+ into cells. ACE inhibitors cause \
                    hyperkalemia.",
        category: "Renal/Metabolic",
    },
    SampleQuestion {
        question_type: QuestionType::Mtf,
        prompt: "Concerning Coeliac Disease:",
        options: [
            ("It is T-cell mediated autoimmune disorder", true),
            ("Dermatitis Herpetiformis is an extra-intestinal manifestation", true),
            ("Anti-TTG antibodies are sensitive and specific", true),
            ("Patients must avoid oats initially", true),
            ("Villous atrophy is seen on biopsy", true),
        ],
        rationale: "All statements are true. Coeliac is autoimmune, associated with DH, diagnosed \
                    with Anti-TTG and biopsy showing villous atrophy.",
        category: "Gastroenterology",
    },
    SampleQuestion {
        question_type: QuestionType::Mtf,
        prompt: "Regarding Atrial Fibrillation (AF):",
        options: [
            ("It is characterized by \"saw-tooth\" waves on ECG", false),
            ("Irregularly irregular pulse is a clinical sign", true),
            ("Beta-blockers are used for rate control", true),
            ("CHA2DS2-VASc score assesses bleeding risk", false),
            ("Valvular AF requires warfarin (or equivalent)", true),
        ],
        rationale: "Saw-tooth waves are Atrial Flutter. CHA2DS2-VASc is for stroke risk; HAS-BLED \
                    is for bleeding risk.",
        category: "Cardiology",
    },
    SampleQuestion {
        question_type: QuestionType::Mtf,
        prompt: "Features of Parkinson's Disease include:",
        options: [
            ("Bradykinesia", true),
            ("Intention tremor", false),
            ("Lead-pipe rigidity", true),
            ("Postural instability", true),
            ("Micrographia", true),
        ],
        rationale: "Tremor in Parkinson's is typically a resting \"pill-rolling\" tremor, not \
                    intention tremor (which suggests cerebellar disease).",
        category: "Neurology",
    },
    SampleQuestion {
        question_type: QuestionType::Mtf,
        prompt: "Regarding Vitamin B12 Deficiency:",
        options: [
            ("Causes microcytic anaemia", false),
            ("Can cause subacute combined degeneration of the cord", true),
            ("Metformin long-term use is a risk factor", true),
            ("Parietal cell antibodies are associated with Pernicious Anaemia", true),
            ("Glossitis is a clinical feature", true),
        ],
        rationale: "B12 deficiency causes MACROcytic anaemia. All other statements are correct.",
        category: "Haematology",
    },
];

/// Rows for the sample set, ids `1..=11`.
pub fn sample_questions() -> Vec<QuestionRow> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
        .single()
        .unwrap_or_default();

    SAMPLES
        .iter()
        .zip(1..)
        .map(|(sample, id)| QuestionRow {
            id,
            question_type: sample.question_type.as_str().to_string(),
            prompt: sample.prompt.to_string(),
            options: Json(StoredOptions::Structured(
                sample
                    .options
                    .iter()
                    .map(|(text, is_correct)| AnswerOption {
                        text: (*text).to_string(),
                        is_correct: *is_correct,
                    })
                    .collect(),
            )),
            correct_answer: None,
            rationale: sample.rationale.to_string(),
            category: sample.category.to_string(),
            sort_order: 0,
            created_at: base + Duration::minutes(5 * (id - 1)),
        })
        .collect()
}
