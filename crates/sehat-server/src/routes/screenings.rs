use axum::Json;
use axum::extract::{Multipart, State};

use sehat_core::models::image::ImageAttachment;
use sehat_core::models::screening::{NewScreening, PatientInputs, ScreeningReceipt};

use crate::error::ApiError;
use crate::state::AppState;

/// Form fields of a create-screening request, as sent by the front-end.
#[derive(Debug, Default)]
pub struct ScreeningForm {
    pub patient_name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub family_history: Option<String>,
    pub smoking_status: Option<String>,
    pub bmi: Option<String>,
    pub wbc: Option<String>,
    pub rbc: Option<String>,
    pub hemoglobin: Option<String>,
    pub tumor_marker: Option<String>,
    pub image: Option<ImageAttachment>,
}

impl ScreeningForm {
    /// Drain a multipart body. Unknown fields are skipped; a repeated field
    /// keeps its last value.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let media_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                let image =
                    ImageAttachment::new(bytes.to_vec(), media_type.as_deref(), file_name.as_deref());
                form.image = (!image.is_empty()).then_some(image);
                continue;
            }

            let slot = match name.as_str() {
                "patientName" => &mut form.patient_name,
                "age" => &mut form.age,
                "gender" => &mut form.gender,
                "familyHistory" => &mut form.family_history,
                "smokingStatus" => &mut form.smoking_status,
                "bmi" => &mut form.bmi,
                "wbc" => &mut form.wbc,
                "rbc" => &mut form.rbc,
                "hemoglobin" => &mut form.hemoglobin,
                "tumorMarker" => &mut form.tumor_marker,
                other => {
                    tracing::debug!(field = %other, "ignoring unknown form field");
                    continue;
                }
            };
            *slot = non_blank(field.text().await?);
        }

        Ok(form)
    }

    /// Split into typed patient inputs and the optional image.
    pub fn into_parts(self) -> (PatientInputs, Option<ImageAttachment>) {
        let inputs = PatientInputs {
            patient_name: PatientInputs::resolve_name(self.patient_name.as_deref()),
            age: self.age.as_deref().and_then(parse_whole),
            gender: self.gender,
            family_history: self.family_history,
            smoking_status: self.smoking_status,
            bmi: self.bmi.as_deref().and_then(parse_decimal),
            wbc: self.wbc.as_deref().and_then(parse_decimal),
            rbc: self.rbc.as_deref().and_then(parse_decimal),
            hemoglobin: self.hemoglobin.as_deref().and_then(parse_decimal),
            tumor_marker: self.tumor_marker.as_deref().and_then(parse_decimal),
        };
        (inputs, self.image)
    }
}

/// `POST /api/screen`: assess the submitted patient, store the screening and
/// return the assessment with the new row id.
pub async fn create_screening(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningReceipt>, ApiError> {
    let (inputs, image) = ScreeningForm::read(multipart).await?.into_parts();

    let outcome = state.requester.assess(&inputs, image).await?;

    let screening = NewScreening::new(inputs, &outcome);
    let id = state
        .store
        .insert(&screening)
        .await
        .map_err(|e| ApiError::ScreeningFailed(e.to_string()))?;

    tracing::info!(
        id,
        assessed = outcome.is_available(),
        "screening stored"
    );

    Ok(Json(ScreeningReceipt {
        assessment: outcome.into_assessment(),
        id,
    }))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Whole-number field. Decimal input is rounded.
pub fn parse_whole(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    parse_decimal(raw)
        .filter(|n| (i64::MIN as f64..=i64::MAX as f64).contains(n))
        .map(|n| n.round() as i64)
}

pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
