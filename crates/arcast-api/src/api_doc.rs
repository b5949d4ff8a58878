//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::admin::{ModelListResponse, PurgeResponse};
use crate::handlers::convert::{ConvertRequest, ConvertResponse};
use crate::handlers::upload::UploadResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload::upload_model,
        crate::handlers::resolve::resolve_model,
        crate::handlers::convert::convert_usdz,
        crate::handlers::admin::list_models,
        crate::handlers::admin::purge_models,
    ),
    components(schemas(
        UploadResponse,
        ConvertRequest,
        ConvertResponse,
        ModelListResponse,
        PurgeResponse,
        ErrorResponse
    )),
    tags(
        (name = "models", description = "Model upload, resolution and administration"),
        (name = "convert", description = "Deferred usdz conversion")
    )
)]
pub struct ApiDoc;
