use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("encountered malformed object: {0}")]
	Field(#[from] apvoc::FieldErr),

	#[error("callback error: {0}")]
	Callback(waypub::BoxError),

	// wrapper error to return arbitrary status codes
	#[error("{0}")]
	Status(StatusCode),
}

impl ApiError {
	pub fn bad_request() -> Self {
		Self::Status(StatusCode::BAD_REQUEST)
	}

	pub fn not_found() -> Self {
		Self::Status(StatusCode::NOT_FOUND)
	}

	pub fn unauthorized() -> Self {
		Self::Status(StatusCode::UNAUTHORIZED)
	}

	pub fn internal_server_error() -> Self {
		Self::Status(StatusCode::INTERNAL_SERVER_ERROR)
	}
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<StatusCode> for ApiError {
	fn from(value: StatusCode) -> Self {
		ApiError::Status(value)
	}
}

impl From<waypub::BoxError> for ApiError {
	fn from(value: waypub::BoxError) -> Self {
		ApiError::Callback(value)
	}
}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		tracing::debug!("emitting error response: {self:?}");
		let descr = self.to_string();
		match self {
			ApiError::Status(status) => status.into_response(),
			ApiError::Field(x) => (
				StatusCode::BAD_REQUEST,
				axum::Json(serde_json::json!({
					"error": "field",
					"field": x.0.to_string(),
					"description": descr,
				}))
			).into_response(),
			ApiError::Callback(x) => (
				StatusCode::INTERNAL_SERVER_ERROR,
				axum::Json(serde_json::json!({
					"error": "callback",
					"description": descr,
					"inner": format!("{x:#?}"),
				}))
			).into_response(),
		}
	}
}
