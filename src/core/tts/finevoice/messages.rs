//! FineVoice wire types.
//!
//! Field names and constant values are dictated by the vendor; the
//! serde renames below reproduce its mixed casing exactly.

use serde::{Deserialize, Serialize};

/// Job status value the vendor uses to mark a finished synthesis
pub const COMPLETE_STATUS: i64 = 3;

/// Body for `POST /api/fsmstexttospeech`
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub engine: &'a str,
    #[serde(rename = "appId")]
    pub app_id: &'a str,
    #[serde(rename = "featureId")]
    pub feature_id: &'a str,
    pub speech: &'a str,
    pub voice: &'a str,
    #[serde(rename = "ChangerType")]
    pub changer_type: u32,
    #[serde(rename = "designUuid")]
    pub design_uuid: Option<&'a str>,
    pub platform: String,
    #[serde(rename = "Parameter")]
    pub parameter: SubmitParameter<'a>,
}

/// Voice parameter block inside [`SubmitRequest`]
#[derive(Debug, Serialize)]
pub struct SubmitParameter<'a> {
    pub speed: u32,
    #[serde(rename = "languageCode")]
    pub language_code: &'a str,
    #[serde(rename = "outputSpeed")]
    pub output_speed: u32,
    #[serde(rename = "outputGender")]
    pub output_gender: u32,
    pub name: &'a str,
    pub ssml: bool,
    pub effect: Option<&'a str>,
    pub amotion: &'a str,
    pub pitch: i32,
    pub temperature: f64,
    pub top_p: f64,
}

impl<'a> SubmitRequest<'a> {
    pub fn new(text: &'a str, voice: &'a str, language_code: &'a str) -> Self {
        Self {
            engine: "gpt-api",
            app_id: "107",
            feature_id: "22",
            speech: text,
            voice,
            changer_type: 3,
            design_uuid: None,
            platform: format!("web-app-tts-{voice}"),
            parameter: SubmitParameter {
                speed: 1,
                language_code,
                output_speed: 1,
                output_gender: 1,
                name: voice,
                ssml: false,
                effect: None,
                amotion: "normal",
                pitch: 0,
                temperature: 0.9,
                top_p: 0.9,
            },
        }
    }
}

/// Body of a successful submit response; the `uuid` is the job token
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub uuid: Option<String>,
}

/// Body of `GET /api/checkfilechangestatus/{uuid}`
#[derive(Debug, Deserialize)]
pub struct JobStatus {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl JobStatus {
    /// Result URL, present only once the job reports the terminal status.
    pub fn completed_url(&self) -> Option<&str> {
        if self.status == Some(COMPLETE_STATUS) {
            self.url.as_deref()
        } else {
            None
        }
    }
}
