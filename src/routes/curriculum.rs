use crate::models::curriculum::{chapters_for, GRADES};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

#[axum::debug_handler]
pub async fn list_grades(State(_state): State<AppState>) -> crate::error::Result<Response> {
    Ok(Json(json!({ "grades": GRADES })).into_response())
}

#[axum::debug_handler]
pub async fn get_grade(
    State(_state): State<AppState>,
    Path(grade): Path<String>,
) -> crate::error::Result<Response> {
    let chapters = chapters_for(&grade).ok_or_else(|| {
        crate::error::Error::NotFound(format!("Không tìm thấy dữ liệu cho Lớp {}", grade))
    })?;
    Ok(Json(json!({ "grade": grade, "chapters": chapters })).into_response())
}
