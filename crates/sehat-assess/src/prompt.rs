//! Instruction text sent to the model for a screening.

use std::fmt::Display;

use sehat_core::models::screening::PatientInputs;

const NOT_PROVIDED: &str = "not provided";

const RESPONSE_FORMAT: &str = "\
Provide a risk assessment in JSON format with the following fields:
- risk_score: (0-100)
- risk_category: (Low, Moderate, High)
- recommendations: (A string of medical recommendations)
- consultation_doctor: (The specific type of specialist to consult, e.g., \"Oncologist\", \"Hematologist\", \"General Physician\")
- image_analysis: (Brief analysis of the provided image if applicable, otherwise \"N/A\")
- feature_importance: (An object with keys like \"Age\", \"Biomarkers\", \"History\" and values 0-1 representing their weight in this specific prediction)

Be conservative and professional. This is for screening purposes only.";

/// Build the assessment instruction for one patient.
///
/// Every structured field is embedded; absent values read as "not provided".
/// The patient's name is not sent to the model.
pub fn build_prompt(inputs: &PatientInputs, has_image: bool) -> String {
    let image_line = if has_image {
        "A medical image has also been provided for analysis."
    } else {
        "No medical image provided."
    };

    format!(
        "As an AI medical assistant, analyze the following patient data for early cancer risk detection.

Patient Data:
- Age: {age}
- Gender: {gender}
- Family History of Cancer: {family_history}
- Smoking Status: {smoking_status}
- BMI: {bmi}
- Blood Biomarkers:
  - WBC: {wbc}
  - RBC: {rbc}
  - Hemoglobin: {hemoglobin}
  - Tumor Marker Level: {tumor_marker}

{image_line}

{RESPONSE_FORMAT}",
        age = or_not_provided(inputs.age.as_ref()),
        gender = or_not_provided(inputs.gender.as_ref()),
        family_history = or_not_provided(inputs.family_history.as_ref()),
        smoking_status = or_not_provided(inputs.smoking_status.as_ref()),
        bmi = or_not_provided(inputs.bmi.as_ref()),
        wbc = or_not_provided(inputs.wbc.as_ref()),
        rbc = or_not_provided(inputs.rbc.as_ref()),
        hemoglobin = or_not_provided(inputs.hemoglobin.as_ref()),
        tumor_marker = or_not_provided(inputs.tumor_marker.as_ref()),
    )
}

fn or_not_provided<T: Display>(value: Option<&T>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}
