use axum::{Extension, extract::State};
use shelf_core::{AuthContext, UserSummary};

use crate::{ApiError, ApiResponse, ShelfState};

/// `GET /profile`. The caller's account as currently stored.
#[tracing::instrument(name = "Profile", skip_all)]
pub async fn profile<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
) -> Result<ApiResponse<UserSummary>, ApiError>
where
    S: ShelfState,
{
    let user = state.scheme().profile(&caller).await?;
    Ok(ApiResponse::success("Profile retrieved successfully", user))
}
