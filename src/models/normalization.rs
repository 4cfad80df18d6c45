use crate::normalizer::NormalizationResult;

/// The outcome of running the normalizer over a single URL, as reported by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizationV1 {
    pub url: String,
    pub excluded: bool,
    pub canonical: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
}

json_responder!(NormalizationV1);

impl NormalizationV1 {
    pub fn excluded<U: Into<String>>(url: U) -> Self {
        Self {
            url: url.into(),
            excluded: true,
            canonical: true,
            location: None,
            status: None,
        }
    }

    pub fn new<U: Into<String>>(url: U, result: NormalizationResult) -> Self {
        match result {
            NormalizationResult::Unchanged => Self {
                url: url.into(),
                excluded: false,
                canonical: true,
                location: None,
                status: None,
            },
            NormalizationResult::Redirect(target) => Self {
                url: url.into(),
                excluded: false,
                canonical: false,
                location: Some(target.location()),
                status: Some(target.status_code.as_u16()),
            },
        }
    }
}
