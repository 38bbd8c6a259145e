//! Handlers not linked to a charge function

use ntex::web;

use super::errors;

/// Return a [NotFound](errors::NotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::NotFound.into())
}
