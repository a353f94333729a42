//! Path extractors for item routes.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::{ApiError, PageError};

/// The `{id}` segment of an item route. A segment that is not a UUID can
/// never name an item, so it is answered like any other unknown id.
pub struct ItemId(pub Uuid);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::NotFound(rejection.body_text()))?;
        raw.parse()
            .map(Self)
            .map_err(|_| ApiError::NotFound(format!("content item not found: {raw}")))
    }
}

/// [`ItemId`] for HTML routes: rejects with the error page.
pub struct PageItemId(pub Uuid);

impl<S> FromRequestParts<S> for PageItemId
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ItemId(id) = ItemId::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}
