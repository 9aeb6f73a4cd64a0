// pixmill/src/server.rs
use crate::core::{PixmillError, ResizeParams, Result};
use crate::processors::{Codec, ImageCodec, LanczosResizer, ResizeFilter};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Requests above this are rejected before the handler runs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const UPLOAD_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>pixmill</title></head>
<body>
  <h1>Resize an image</h1>
  <form enctype="multipart/form-data" action="/" method="post">
    <p><input type="file" name="uploadFile"></p>
    <p><label>Width: <input type="text" name="width" value="800"></label></p>
    <p><label>Height: <input type="text" name="height" value="600"></label></p>
    <p><input type="submit" value="Resize"></p>
  </form>
</body>
</html>
"#;

/// Read-only capability registry shared across requests.
struct AppState {
    codec: ImageCodec,
    resizer: LanczosResizer,
}

pub async fn serve(port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        codec: ImageCodec::new(),
        resizer: LanczosResizer::new(),
    });

    let app = Router::new()
        .route("/", get(upload_form).post(handle_upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("server started on :{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

async fn handle_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut width: Option<String> = None;
    let mut height: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match name.as_str() {
                    "uploadFile" => match field.bytes().await {
                        Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                        Err(e) => {
                            return plain_error(
                                StatusCode::BAD_REQUEST,
                                format!("could not read file: {}", e),
                            )
                        }
                    },
                    "width" => match field.text().await {
                        Ok(text) => width = Some(text),
                        Err(e) => {
                            return plain_error(
                                StatusCode::BAD_REQUEST,
                                format!("could not read width: {}", e),
                            )
                        }
                    },
                    "height" => match field.text().await {
                        Ok(text) => height = Some(text),
                        Err(e) => {
                            return plain_error(
                                StatusCode::BAD_REQUEST,
                                format!("could not read height: {}", e),
                            )
                        }
                    },
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => {
                return plain_error(
                    StatusCode::BAD_REQUEST,
                    format!("error parsing form data: {}", e),
                )
            }
        }
    }

    let params = match parse_dimensions(width.as_deref(), height.as_deref()) {
        Ok(params) => params,
        Err(e) => return plain_error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let Some(bytes) = file_bytes else {
        return plain_error(StatusCode::BAD_REQUEST, "missing uploadFile field".to_string());
    };

    match transform_upload(&state.codec, &state.resizer, &bytes, params) {
        Ok((encoded, content_type)) => {
            ([(header::CONTENT_TYPE, content_type)], encoded).into_response()
        }
        Err(e @ PixmillError::Decode(_)) => plain_error(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => plain_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// decode → resize → encode with the detected format at default quality; no
/// size budget and no persistence.
fn transform_upload<C: Codec, R: ResizeFilter>(
    codec: &C,
    resizer: &R,
    bytes: &[u8],
    params: ResizeParams,
) -> Result<(Vec<u8>, &'static str)> {
    let (image, format) = codec.decode(bytes)?;
    let resized = resizer.resize(&image, params);
    let encoded = codec.encode(&resized, format, None)?;
    Ok((encoded, format.to_mime_type()))
}

fn plain_error(status: StatusCode, message: String) -> Response {
    (status, message).into_response()
}

fn parse_dimensions(width: Option<&str>, height: Option<&str>) -> Result<ResizeParams> {
    let width = parse_axis(width, "width")?;
    let height = parse_axis(height, "height")?;
    Ok(ResizeParams::new(width, height))
}

fn parse_axis(value: Option<&str>, name: &str) -> Result<u32> {
    value
        .unwrap_or_default()
        .trim()
        .parse::<u32>()
        .map_err(|e| PixmillError::InvalidParameter(format!("invalid {}: {}", name, e)))
}
