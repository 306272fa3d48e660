use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeOwned},
    ser::SerializeStruct,
};
use uuid::Uuid;

/// Machine-readable reason carried by a failure envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    ValidationFailed,
    Unauthorized,
    NotFound,
    Conflict,
    InternalError,
}

/// Envelope every API response is wrapped in.
///
/// On the wire this is `{ "success": true, "data": ... }` or
/// `{ "success": false, "error": "...", "code": "..." }`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure { code: ErrorCode, message: String },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Failure {
            code,
            message: message.into(),
        }
    }

    pub fn into_result(self) -> Result<T, (ErrorCode, String)> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure { code, message } => Err((code, message)),
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(data) => {
                let mut state = serializer.serialize_struct("ApiResponse", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Self::Failure { code, message } => {
                let mut state = serializer.serialize_struct("ApiResponse", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
                state.serialize_field("code", code)?;
                state.end()
            }
        }
    }
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    code: Option<ErrorCode>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::<T>::deserialize(deserializer)?;

        match (raw.success, raw.data) {
            (true, Some(data)) => Ok(Self::Success(data)),
            (true, None) => Err(de::Error::missing_field("data")),
            (false, _) => Ok(Self::Failure {
                code: raw.code.unwrap_or(ErrorCode::InternalError),
                message: raw.error.unwrap_or_default(),
            }),
        }
    }
}

/// Parses a mandatory UUID query parameter. Empty values count as missing.
pub fn require_uuid_param(value: Option<&str>, name: &str) -> Result<Uuid, String> {
    optional_uuid_param(value, name)?.ok_or_else(|| format!("{} is required", name))
}

pub fn optional_uuid_param(value: Option<&str>, name: &str) -> Result<Option<Uuid>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| format!("{} must be a valid UUID", name)),
        None => Ok(None),
    }
}
