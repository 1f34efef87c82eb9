//! Sample cases registered by the `testgate` binary.
//!
//! These stand in for a real suite so the harness can be exercised end to
//! end without any external services: a unit arithmetic case, an api
//! payload-shape case over a canned JSON document, and a browser case that
//! checks the title of an embedded HTML fixture.

use gate::{ensure, CaseFailure, Category, TestCase};
use serde_json::Value;

/// Unit case over plain arithmetic.
pub struct ArithmeticCase;

impl TestCase for ArithmeticCase {
    fn name(&self) -> &str {
        "arithmetic"
    }

    fn category(&self) -> Category {
        Category::unit()
    }

    fn execute(&mut self) -> Result<(), CaseFailure> {
        let sum: i64 = (1..=10).sum();
        ensure(sum == 55, format!("expected 55, got {sum}"))
    }
}

/// Api case validating the shape of a canned status payload.
pub struct StatusPayloadCase;

const STATUS_PAYLOAD: &str = r#"{"status": "ok", "uptime_seconds": 4210, "checks": ["db", "cache"]}"#;

impl TestCase for StatusPayloadCase {
    fn name(&self) -> &str {
        "status-payload"
    }

    fn category(&self) -> Category {
        Category::api()
    }

    fn execute(&mut self) -> Result<(), CaseFailure> {
        let payload: Value = serde_json::from_str(STATUS_PAYLOAD)
            .map_err(|e| CaseFailure::Unexpected(format!("payload not parseable: {e}")))?;

        ensure(
            payload["status"] == "ok",
            format!("status was {}", payload["status"]),
        )?;
        ensure(
            payload["uptime_seconds"].as_u64().is_some(),
            "uptime_seconds missing or not a number",
        )?;
        let checks = payload["checks"].as_array();
        ensure(
            checks.is_some_and(|c| !c.is_empty()),
            "checks missing or empty",
        )
    }
}

/// Browser case asserting the title of an embedded page fixture.
pub struct HomepageTitleCase;

const HOMEPAGE_FIXTURE: &str =
    "<html><head><title>testgate demo</title></head><body><h1>hello</h1></body></html>";

impl HomepageTitleCase {
    fn title(html: &str) -> Option<&str> {
        let start = html.find("<title>")? + "<title>".len();
        let end = html[start..].find("</title>")? + start;
        Some(&html[start..end])
    }
}

impl TestCase for HomepageTitleCase {
    fn name(&self) -> &str {
        "homepage-title"
    }

    fn category(&self) -> Category {
        Category::browser()
    }

    fn execute(&mut self) -> Result<(), CaseFailure> {
        let title = Self::title(HOMEPAGE_FIXTURE)
            .ok_or_else(|| CaseFailure::Unexpected("page has no title element".to_string()))?;
        ensure(
            title == "testgate demo",
            format!("title was '{title}'"),
        )
    }
}
