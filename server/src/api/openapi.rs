//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Books and authors catalog"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "authors", description = "Author management and criteria queries"),
        (name = "books", description = "Book management and criteria queries")
    ),
    paths(
        health::health,
        authors::list_authors,
        authors::count_authors,
        authors::create_author,
        authors::get_author,
        authors::update_author,
        authors::patch_author,
        authors::delete_author,
        books::list_books,
        books::count_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::patch_book,
        books::delete_book,
    ),
    components(schemas(
        health::HealthResponse,
        authors::types::AuthorDto,
        authors::types::AuthorRequest,
        authors::types::AuthorPatchRequest,
        books::types::BookDto,
        books::types::BookAuthorDto,
        books::types::AuthorRef,
        books::types::BookRequest,
        books::types::BookPatchRequest,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Libris API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_entity_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/authors",
            "/api/authors/count",
            "/api/authors/{id}",
            "/api/books",
            "/api/books/count",
            "/api/books/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
