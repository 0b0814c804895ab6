use sehat_assess::prompt::build_prompt;
use sehat_core::models::screening::PatientInputs;

fn inputs() -> PatientInputs {
    PatientInputs {
        patient_name: "Meera Iyer".to_string(),
        age: Some(58),
        gender: Some("Female".to_string()),
        family_history: Some("Mother: breast cancer".to_string()),
        smoking_status: Some("Former".to_string()),
        bmi: Some(27.3),
        wbc: Some(11.2),
        rbc: Some(4.1),
        hemoglobin: Some(10.8),
        tumor_marker: Some(38.5),
    }
}

#[test]
fn all_fields_are_embedded() {
    let prompt = build_prompt(&inputs(), false);

    assert!(prompt.contains("- Age: 58"));
    assert!(prompt.contains("- Gender: Female"));
    assert!(prompt.contains("- Family History of Cancer: Mother: breast cancer"));
    assert!(prompt.contains("- Smoking Status: Former"));
    assert!(prompt.contains("- BMI: 27.3"));
    assert!(prompt.contains("- WBC: 11.2"));
    assert!(prompt.contains("- RBC: 4.1"));
    assert!(prompt.contains("- Hemoglobin: 10.8"));
    assert!(prompt.contains("- Tumor Marker Level: 38.5"));
}

#[test]
fn patient_name_is_not_sent() {
    assert!(!build_prompt(&inputs(), false).contains("Meera"));
}

#[test]
fn image_presence_is_noted() {
    assert!(build_prompt(&inputs(), true).contains("A medical image has also been provided"));

    let without = build_prompt(&inputs(), false);
    assert!(without.contains("No medical image provided."));
    assert!(!without.contains("A medical image has also been provided"));
}

#[test]
fn missing_fields_read_not_provided() {
    let prompt = build_prompt(&PatientInputs::default(), false);
    assert!(prompt.contains("- Age: not provided"));
    assert!(prompt.contains("- Tumor Marker Level: not provided"));
}

#[test]
fn response_keys_are_requested() {
    let prompt = build_prompt(&inputs(), false);
    for key in [
        "risk_score",
        "risk_category",
        "recommendations",
        "consultation_doctor",
        "image_analysis",
        "feature_importance",
    ] {
        assert!(prompt.contains(key), "prompt should request {key}");
    }
    assert!(prompt.contains("(Low, Moderate, High)"));
    assert!(prompt.contains("otherwise \"N/A\""));
}
