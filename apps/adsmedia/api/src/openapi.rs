use axum_helpers::errors::ErrorResponse;
use utoipa::OpenApi;

/// Combined API documentation for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ADSMedia Email API",
        description = "Transactional email via ADSMedia: sending, suppression checks and usage"
    ),
    nest((path = "/api/email", api = domain_adsmedia::EmailApiDoc)),
    components(schemas(ErrorResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_paths_nested_under_api() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/email/send"));
        assert!(doc.paths.paths.contains_key("/api/email/check"));
    }
}
