use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::script::{
        GenerateScriptRequest, GenerateScriptResponse, ScriptService, ScriptServiceApi,
    },
    error::AppResult,
};

pub struct ScriptController {
    script_service: Arc<ScriptService>,
}

impl ScriptController {
    pub fn new(script_service: Arc<ScriptService>) -> Self {
        Self { script_service }
    }

    /// POST /api/generate-text - Write a podcast script for a topic
    pub async fn generate(
        State(controller): State<Arc<ScriptController>>,
        payload: Result<Json<GenerateScriptRequest>, JsonRejection>,
    ) -> AppResult<Json<GenerateScriptResponse>> {
        let Json(request) = payload?;
        let generated = controller.script_service.generate(request).await?;

        Ok(Json(generated.into()))
    }
}
