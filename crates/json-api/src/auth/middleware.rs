//! Auth middleware.

use autoparts_app::domain::callers::CallerUuid;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use uuid::Uuid;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let Ok(caller) = token.parse::<Uuid>() else {
        res.render(StatusError::unauthorized().brief("Invalid caller token"));

        return;
    };

    depot.insert_caller_uuid(CallerUuid::from_uuid(caller));

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
