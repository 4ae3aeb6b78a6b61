//! Browser form at `/`.
//!
//! A single server-rendered page: the form posts back to `/` and the page is
//! rendered again with the three outputs filled in.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use duygu_core::constants::DEFAULT_LANG;
use duygu_core::{Language, PredictRequest, PredictResponse};
use serde::Deserialize;

use super::{run_prediction, Source};
use crate::server::AppState;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="tr">
<head>
  <meta charset="utf-8">
  <title>Duygu Analizi API</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
    label { display: block; margin-top: 1rem; font-weight: 600; }
    textarea, select { width: 100%; box-sizing: border-box; }
    pre, output { display: block; background: #f4f4f4; padding: .5rem; min-height: 1.5rem; }
    .error { color: #b00020; }
  </style>
</head>
<body>
  <h1>Duygu Analizi API</h1>
  <p>POST /api/predict endpoint'i ile kullanılabilir.</p>
  <form method="post" action="/">
    <label for="text">Metin</label>
    <textarea id="text" name="text" rows="4">{{text}}</textarea>
    <label for="lang">Dil</label>
    <select id="lang" name="lang">
      <option value="tr"{{tr_selected}}>tr</option>
      <option value="en"{{en_selected}}>en</option>
    </select>
    <p><button type="submit">Gönder</button></p>
  </form>
  {{error}}
  <label>Olasılıklar</label>
  <pre id="probs">{{probs}}</pre>
  <label>Tahmin (Türkçe)</label>
  <output id="label_tr">{{label_tr}}</output>
  <label>Etiket (EN + Dil)</label>
  <output id="label_en">{{label_en}}</output>
</body>
</html>
"#;

/// Form fields; both optional like the JSON API.
#[derive(Debug, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    text: String,
    #[serde(default)]
    lang: Option<String>,
}

/// GET / renders an empty form.
pub async fn form_page() -> Html<String> {
    Html(render_page("", DEFAULT_LANG, None, None))
}

/// POST / classifies the submission and re-renders the page.
pub async fn form_submit(State(state): State<AppState>, Form(input): Form<FormInput>) -> Response {
    let request = PredictRequest {
        text: input.text,
        lang: input.lang.unwrap_or_else(|| DEFAULT_LANG.to_string()),
    };
    match run_prediction(&state.analyzer, &request, Source::Form).await {
        Ok(response) => {
            Html(render_page(&request.text, &request.lang, Some(&response), None)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_page(&request.text, &request.lang, None, Some(&e.to_string()))),
        )
            .into_response(),
    }
}

/// Fill the page template. Every interpolated value is escaped.
pub fn render_page(
    text: &str,
    lang: &str,
    response: Option<&PredictResponse>,
    error: Option<&str>,
) -> String {
    let is_en = Language::route(lang) == Language::En;
    let (probs, label_tr, label_en) = match response {
        Some(r) => (
            serde_json::to_string_pretty(&r.probs).unwrap_or_default(),
            r.label_tr.as_str(),
            r.label_en.as_str(),
        ),
        None => (String::new(), "", ""),
    };
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    PAGE_HTML
        .replace("{{tr_selected}}", if is_en { "" } else { " selected" })
        .replace("{{en_selected}}", if is_en { " selected" } else { "" })
        .replace("{{error}}", &error)
        .replace("{{probs}}", &escape_html(&probs))
        .replace("{{label_tr}}", &escape_html(label_tr))
        .replace("{{label_en}}", &escape_html(label_en))
        // Last, so user text containing placeholders is never expanded.
        .replace("{{text}}", &escape_html(text))
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
