//! # surveyai-html
//!
//! HTML rendering surface for surveyai.
//!
//! `HtmlSurface` implements both `RenderSurface` and `ChartSurface`, collecting escaped
//! HTML fragments: the builder canvas, chat transcripts, the mobile form, voice and
//! avatar lines, and the dashboard charts.
//!
//! ## Example
//!
//! ```rust
//! use surveyai::AuthoringSession;
//! use surveyai_html::{HtmlOptions, to_html_with_options};
//!
//! let mut session = AuthoringSession::new();
//! session.add_from_catalog("nss_1").unwrap();
//!
//! let html = to_html_with_options(
//!     &session,
//!     HtmlOptions::new().with_title("Household Survey"),
//! );
//! assert!(html.contains("<title>Household Survey</title>"));
//! assert!(html.contains("data-question-id=\"nss_1\""));
//! ```

mod generator;

pub use generator::{HtmlOptions, HtmlSurface, dashboard_html, to_html, to_html_with_options};
