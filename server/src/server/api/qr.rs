//! QR generation API.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use serde::Serialize;
use serde_json::Value;

use qr_engine::{ColorMask, ColorStyle, EcLevel, EngineError, ModuleStyle, QrRequest, Rgba};

use super::err_json;
use crate::app::SharedState;

/// Fixed name the generated image is downloaded under.
pub const OUTPUT_FILENAME: &str = "artistic_qrcode.png";

const DEFAULT_BOX_SIZE: u32 = 10;
const DEFAULT_BORDER: u32 = 4;
const DEFAULT_FILL: &str = "#000000";
const DEFAULT_BACK: &str = "#FFFFFF";
const DEFAULT_CENTER: &str = "#FF0000";
const DEFAULT_EDGE: &str = "#0000FF";

type ApiError = (StatusCode, Json<Value>);

/// POST /api/qr – generate a styled QR code PNG from multipart form fields.
pub async fn generate_qr(
    State(_state): State<SharedState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;
    let request = build_request(form)?;

    let png = qr_engine::generate_png(&request).map_err(engine_err)?;
    tracing::info!(
        bytes = png.len(),
        style = request.module_style.as_str(),
        "Generated QR code"
    );

    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{OUTPUT_FILENAME}\""),
        )
        .body(Body::from(png))
        .map_err(|e| err_json(500, &e.to_string()))
}

#[derive(Serialize)]
struct OptionEntry {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
pub struct QrOptions {
    error_correction: Vec<OptionEntry>,
    module_styles: Vec<OptionEntry>,
    color_styles: Vec<OptionEntry>,
}

/// GET /api/qr/options – selectable values for the form UI.
pub async fn get_options() -> Json<QrOptions> {
    let entry = |value, label| OptionEntry { value, label };
    Json(QrOptions {
        error_correction: EcLevel::ALL
            .iter()
            .map(|l| entry(l.as_str(), l.label()))
            .collect(),
        module_styles: ModuleStyle::ALL
            .iter()
            .map(|s| entry(s.as_str(), s.label()))
            .collect(),
        color_styles: ColorStyle::ALL
            .iter()
            .map(|s| entry(s.as_str(), s.label()))
            .collect(),
    })
}

/// Raw multipart form fields, before translation into a [`QrRequest`].
#[derive(Default)]
struct RawForm {
    payload: Option<String>,
    error_correction: Option<String>,
    box_size: Option<String>,
    border: Option<String>,
    module_style: Option<String>,
    color_style: Option<String>,
    fill_color: Option<String>,
    back_color: Option<String>,
    center_color: Option<String>,
    edge_color: Option<String>,
    logo: Option<Vec<u8>>,
}

async fn read_form(mut multipart: Multipart) -> Result<RawForm, ApiError> {
    let mut form = RawForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| err_json(400, &e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "logo" {
            let data = field
                .bytes()
                .await
                .map_err(|e| err_json(400, &e.to_string()))?;
            // A file input submitted without a selection arrives empty.
            if !data.is_empty() {
                form.logo = Some(data.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| err_json(400, &e.to_string()))?;
        match name.as_str() {
            "payload" => form.payload = Some(value),
            "error_correction" => form.error_correction = Some(value),
            "box_size" => form.box_size = Some(value),
            "border" => form.border = Some(value),
            "module_style" => form.module_style = Some(value),
            "color_style" => form.color_style = Some(value),
            "fill_color" => form.fill_color = Some(value),
            "back_color" => form.back_color = Some(value),
            "center_color" => form.center_color = Some(value),
            "edge_color" => form.edge_color = Some(value),
            _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Translate the raw form into an engine request, applying form defaults
/// for absent fields.
fn build_request(form: RawForm) -> Result<QrRequest, ApiError> {
    let ec_level = parse_option(form.error_correction.as_deref(), EcLevel::Medium)?;
    let module_style = parse_option(form.module_style.as_deref(), ModuleStyle::Square)?;
    let color_style = parse_option(form.color_style.as_deref(), ColorStyle::Solid)?;

    let back = parse_color(form.back_color.as_deref(), DEFAULT_BACK)?;
    let mask = match color_style {
        ColorStyle::Solid => ColorMask::Solid {
            front: parse_color(form.fill_color.as_deref(), DEFAULT_FILL)?,
            back,
        },
        ColorStyle::SquareGradient => ColorMask::SquareGradient {
            center: parse_color(form.center_color.as_deref(), DEFAULT_CENTER)?,
            edge: parse_color(form.edge_color.as_deref(), DEFAULT_EDGE)?,
            back,
        },
        ColorStyle::RadialGradient => ColorMask::RadialGradient {
            center: parse_color(form.center_color.as_deref(), DEFAULT_CENTER)?,
            edge: parse_color(form.edge_color.as_deref(), DEFAULT_EDGE)?,
            back,
        },
    };

    Ok(QrRequest {
        payload: form.payload.unwrap_or_default(),
        ec_level,
        box_size: parse_number(form.box_size.as_deref(), "box size", DEFAULT_BOX_SIZE)?,
        border: parse_number(form.border.as_deref(), "border", DEFAULT_BORDER)?,
        module_style,
        mask,
        logo: form.logo,
    })
}

fn parse_option<T>(value: Option<&str>, default: T) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = EngineError>,
{
    match value {
        None | Some("") => Ok(default),
        Some(v) => v.parse().map_err(|e: EngineError| err_json(400, &e.to_string())),
    }
}

fn parse_number(value: Option<&str>, name: &str, default: u32) -> Result<u32, ApiError> {
    match value {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| err_json(400, &format!("Invalid {name}: {v}"))),
    }
}

fn parse_color(value: Option<&str>, default: &str) -> Result<Rgba<u8>, ApiError> {
    let hex = value.filter(|v| !v.is_empty()).unwrap_or(default);
    qr_engine::parse_hex(hex).map_err(|e| err_json(400, &e.to_string()))
}

fn engine_err(error: EngineError) -> ApiError {
    let status = match error {
        // The encoder refusing a payload is a request problem, not ours.
        EngineError::Encode(_) => 422,
        EngineError::Export(_) => 500,
        _ => 400,
    };
    err_json(status, &error.to_string())
}
