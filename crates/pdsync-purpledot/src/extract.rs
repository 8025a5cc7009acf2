//! Delivery-date extraction from preorder service responses.
//!
//! The response shape has varied across API revisions:
//!
//! ```text
//! { "data": { "waitlist": { ... } } }        current
//! { "data": [ { "waitlist": { ... } } ] }    list envelope
//! [ { "waitlist": { ... } } ]                bare array
//! { "waitlist": { ... } }                    unwrapped
//! ```
//!
//! Each shape is a locator function tried in order. Within the waitlist
//! object the date itself is resolved from an ordered list of fields. A missing
//! key at any level is absence, never an error.

use serde_json::Value;

use crate::normalize::normalize_timestamp;

type WaitlistLocator = fn(&Value) -> Option<&Value>;
type DateResolver = fn(&Value) -> Option<String>;

const WAITLIST_LOCATORS: &[(&str, WaitlistLocator)] = &[
    ("data.waitlist", data_waitlist),
    ("data[0].waitlist", data_first_waitlist),
    ("[0].waitlist", array_first_waitlist),
    ("waitlist", top_level_waitlist),
];

const DATE_RESOLVERS: &[(&str, DateResolver)] = &[
    ("display_dispatch_date", display_dispatch_date),
    ("dispatch_date", dispatch_date),
    ("expected_dispatch_date", expected_dispatch_date),
];

/// A delivery date plus where in the response it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDate {
    pub path: &'static str,
    pub field: &'static str,
    pub value: String,
}

/// Returns the first delivery date resolvable from `body`, or `None`.
#[must_use]
pub fn extract_delivery_date(body: &Value) -> Option<ExtractedDate> {
    WAITLIST_LOCATORS.iter().find_map(|&(path, locate)| {
        let waitlist = locate(body)?;
        resolve_date(waitlist).map(|(field, value)| ExtractedDate {
            path,
            field,
            value,
        })
    })
}

/// A waitlist may itself be a list; the first entry with a date wins.
fn resolve_date(waitlist: &Value) -> Option<(&'static str, String)> {
    match waitlist {
        Value::Array(entries) => entries.iter().find_map(resolve_date_in_object),
        other => resolve_date_in_object(other),
    }
}

fn resolve_date_in_object(waitlist: &Value) -> Option<(&'static str, String)> {
    if !waitlist.is_object() {
        return None;
    }
    DATE_RESOLVERS
        .iter()
        .find_map(|&(field, resolve)| resolve(waitlist).map(|v| (field, v)))
}

fn data_waitlist(body: &Value) -> Option<&Value> {
    body.get("data")?.as_object()?.get("waitlist")
}

fn data_first_waitlist(body: &Value) -> Option<&Value> {
    body.get("data")?.as_array()?.first()?.get("waitlist")
}

fn array_first_waitlist(body: &Value) -> Option<&Value> {
    body.as_array()?.first()?.get("waitlist")
}

fn top_level_waitlist(body: &Value) -> Option<&Value> {
    body.as_object()?.get("waitlist")
}

/// Already display-formatted upstream; used verbatim apart from trimming.
fn display_dispatch_date(waitlist: &Value) -> Option<String> {
    waitlist
        .get("display_dispatch_date")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn dispatch_date(waitlist: &Value) -> Option<String> {
    normalize_timestamp(waitlist.get("dispatch_date")?)
}

fn expected_dispatch_date(waitlist: &Value) -> Option<String> {
    normalize_timestamp(waitlist.get("expected_dispatch_date")?)
}
