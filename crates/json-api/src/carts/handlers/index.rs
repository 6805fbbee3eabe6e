//! List Carts Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, handlers::get::CartResponse},
    extensions::*,
    state::State,
};

/// Carts Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsResponse {
    /// The caller's carts
    pub carts: Vec<CartResponse>,
}

/// List Carts Handler
///
/// Returns the carts owned by the caller, oldest first.
#[endpoint(
    tags("carts"),
    summary = "List Carts",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_uuid_or_401()?;

    let carts = state
        .app
        .carts
        .list_carts(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartsResponse {
        carts: carts.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use autoparts_app::domain::carts::{MockCartsService, models::CartUuid};

    use crate::test_helpers::{TEST_CALLER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_the_callers_carts() -> TestResult {
        let first = CartUuid::new();
        let second = CartUuid::new();

        let carts = vec![make_cart(first), make_cart(second)];

        let mut repo = MockCartsService::new();

        repo.expect_list_carts()
            .once()
            .withf(move |caller| *caller == TEST_CALLER_UUID)
            .return_once(move |_| Ok(carts));

        repo.expect_get_cart().never();

        let mut res = TestClient::get("http://example.com/carts")
            .send(&make_service(repo))
            .await;

        let body: CartsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.carts.len(), 2);
        assert_eq!(body.carts[0].uuid, first.into_uuid());
        assert_eq!(body.carts[1].uuid, second.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_no_carts_returns_empty_list() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_list_carts().once().return_once(|_| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/carts")
            .send(&make_service(repo))
            .await;

        let body: CartsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.carts.is_empty());

        Ok(())
    }
}
