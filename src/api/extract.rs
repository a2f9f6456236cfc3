use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::HrError;

/// JSON body extractor whose rejection is an [`HrError::BadRequest`].
///
/// Missing fields are left to validation; this only catches bodies serde
/// cannot read at all, such as malformed JSON, a wrong value type or an
/// unparseable date.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HrError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HrError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
