use axum::http::{StatusCode, Uri};

use super::problem::Problem;
use crate::domain::error::DomainError;
use crate::domain::evaluator::EvalError;

pub type ApiResult<T> = Result<T, Problem>;

/// Converts a failed handler step into a [`Problem`] whose `instance` is the
/// request path.
pub trait ResultExt<T> {
    /// # Errors
    /// Returns the converted problem when `self` is an error.
    fn at(self, uri: &Uri) -> ApiResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Problem>,
{
    fn at(self, uri: &Uri) -> ApiResult<T> {
        self.map_err(|e| e.into().with_instance(uri.path()))
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let (status, code, title) = match &e {
            DomainError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                "CALCULATOR_SESSION_NOT_FOUND",
                "Session not found",
            ),
            DomainError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, "CALCULATOR_VALIDATION", "Bad Request")
            }
            DomainError::CapacityExceeded { limit } => {
                tracing::warn!(limit, "calculator session capacity exhausted");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CALCULATOR_CAPACITY",
                    "Service Unavailable",
                )
            }
        };

        Problem::new(status, title, e.to_string())
            .with_code(code)
            .with_current_trace()
    }
}

impl From<EvalError> for Problem {
    fn from(e: EvalError) -> Self {
        let code = match e {
            EvalError::DivisionByZero => "CALCULATOR_DIVISION_BY_ZERO",
            EvalError::InvalidOperation(_) => "CALCULATOR_INVALID_OPERATION",
            EvalError::InvalidNumber(_) => "CALCULATOR_INVALID_NUMBER",
        };

        Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Calculation failed",
            e.to_string(),
        )
        .with_code(code)
        .with_current_trace()
    }
}

impl From<minijinja::Error> for Problem {
    fn from(e: minijinja::Error) -> Self {
        tracing::error!(error = %e, "calculator page failed to render");
        Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "The calculator page could not be rendered.",
        )
        .with_code("CALCULATOR_RENDER")
        .with_current_trace()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use calculator_sdk::SessionId;

    #[test]
    fn not_found_maps_to_404() {
        let p: Problem = DomainError::NotFound {
            id: SessionId::new(),
        }
        .into();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.code, "CALCULATOR_SESSION_NOT_FOUND");
    }

    #[test]
    fn validation_maps_to_400_with_detail() {
        let p: Problem = DomainError::validation("digit", "too long").into();
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.detail, "Validation error on field 'digit': too long");
    }

    #[test]
    fn capacity_maps_to_503() {
        let p: Problem = DomainError::CapacityExceeded { limit: 1 }.into();
        assert_eq!(p.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn division_by_zero_maps_to_422() {
        let p: Problem = EvalError::DivisionByZero.into();
        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, "CALCULATOR_DIVISION_BY_ZERO");
        assert_eq!(p.detail, "Division by zero is not allowed.");
    }

    #[test]
    fn render_failure_maps_to_500_without_leaking_details() {
        let err = minijinja::Error::new(minijinja::ErrorKind::UndefinedError, "missing `display`");
        let p: Problem = err.into();
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(p.code, "CALCULATOR_RENDER");
        assert!(!p.detail.contains("display"));
    }

    #[test]
    fn at_sets_instance_to_request_path() {
        let uri: Uri = "/calculator/v1/sessions/abc?x=1".parse().unwrap();
        let res: Result<(), DomainError> = Err(DomainError::NotFound {
            id: SessionId::new(),
        });
        let p = res.at(&uri).unwrap_err();
        assert_eq!(p.instance, "/calculator/v1/sessions/abc");
        assert_eq!(p.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn at_passes_success_through() {
        let uri: Uri = "/calculator/v1/evaluate".parse().unwrap();
        let res: Result<u8, EvalError> = Ok(7);
        assert_eq!(res.at(&uri).unwrap(), 7);
    }
}
