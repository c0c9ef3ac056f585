use axum::{
    extract::{RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::models::Role;
use crate::state::AppState;

pub const OWNER_ONLY: &[Role] = &[Role::Owner];
pub const STORE_MEMBERS: &[Role] = &[Role::Owner, Role::Staff];

/// Per-route allow-list plus the membership lookup collaborator.
#[derive(Clone)]
pub struct RoleGate {
    pub state: AppState,
    pub allowed: &'static [Role],
}

impl RoleGate {
    pub fn new(state: AppState, allowed: &'static [Role]) -> Self {
        Self { state, allowed }
    }
}

/// Authorization guard: one fresh membership read, one pure decision.
///
/// Missing subject or store scope is a static precondition failure and never
/// reaches the lookup. The role is re-read on every request, so a revoked
/// membership takes effect on the very next call; the window between this
/// read and the handler's effect is an accepted race.
pub async fn authorize(
    State(gate): State<RoleGate>,
    params: RawPathParams,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let subject = request.extensions().get::<Claims>().map(|claims| claims.sub);
    let store_id = params
        .iter()
        .find(|(name, _)| *name == "store_id")
        .and_then(|(_, value)| Uuid::parse_str(value).ok());

    let (Some(subject), Some(store_id)) = (subject, store_id) else {
        return Err(ApiError::Forbidden);
    };

    let role = gate.state.stores.get_user_role(store_id, subject).await?;
    if !role_allowed(role, gate.allowed) {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}

fn role_allowed(role: Option<Role>, allowed: &[Role]) -> bool {
    role.is_some_and(|r| allowed.contains(&r))
}
