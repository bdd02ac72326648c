//! Per-variant validation rules
//!
//! Every rule that fails is reported; validation never stops at the first
//! problem. Field paths are relative to the component, e.g.
//! `payload.items[1].header`.

use std::collections::HashMap;

use url::Url;

use super::markup;
use crate::errors::{FieldViolation, PageKitError, Result};
use crate::model::{
    AccordionPayload, BannerPayload, CardPayload, Component, ComponentPayload, ImageRef,
    LinkGroupPayload, RichText,
};

pub const MAX_TEXT_LEN: usize = 255;
pub const MAX_URL_LEN: usize = 2048;

/// Outcome of validating one entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    /// `Ok(())` when valid, otherwise `ValidationFailed` with every violation
    ///
    /// # Errors
    /// Returns `PageKitError::ValidationFailed` if any rule failed.
    pub fn into_result(self, entity_id: &str) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PageKitError::ValidationFailed {
                entity_id: entity_id.to_string(),
                violations: self.violations,
            })
        }
    }
}

/// Validate a component's payload against the rules of its kind
pub fn validate_component(component: &Component) -> ValidationReport {
    let mut report = ValidationReport::new();
    match component.payload() {
        ComponentPayload::Text(text) => check_rich_text(&mut report, "payload.content", &text.content),
        ComponentPayload::Banner(banner) => check_banner(&mut report, banner),
        ComponentPayload::Card(card) => check_card(&mut report, card),
        ComponentPayload::Accordion(acc) => check_accordion(&mut report, acc),
        ComponentPayload::LinkGroup(group) => check_link_group(&mut report, group),
        ComponentPayload::Image(body)
        | ComponentPayload::Button(body)
        | ComponentPayload::Container(body) => {
            if !body.is_object() {
                report.push("payload", "reserved component payload must be an object");
            }
        }
    }
    report
}

fn check_required_text(report: &mut ValidationReport, field: &str, value: &str) {
    if value.trim().is_empty() {
        report.push(field, "must not be empty");
    } else {
        check_text_len(report, field, value);
    }
}

fn check_text_len(report: &mut ValidationReport, field: &str, value: &str) {
    if value.chars().count() > MAX_TEXT_LEN {
        report.push(field, format!("must be at most {MAX_TEXT_LEN} characters"));
    }
}

fn check_url(report: &mut ValidationReport, field: &str, value: &str) {
    if value.trim().is_empty() {
        report.push(field, "must not be empty");
        return;
    }
    if value.len() > MAX_URL_LEN {
        report.push(field, format!("must be at most {MAX_URL_LEN} characters"));
        return;
    }
    if let Err(e) = Url::parse(value) {
        report.push(field, format!("is not a valid URL: {e}"));
    }
}

fn check_image(report: &mut ValidationReport, field: &str, image: &ImageRef) {
    check_url(report, &format!("{field}.url"), &image.url);
    check_text_len(report, &format!("{field}.altText"), &image.alt_text);
}

fn check_rich_text(report: &mut ValidationReport, field: &str, text: &RichText) {
    for problem in markup::check(text.format, &text.data) {
        report.push(format!("{field}.data"), problem);
    }
    if text.metadata.version == 0 {
        report.push(format!("{field}.metadata.version"), "must be at least 1");
    }
    if text.metadata.last_modified_at < text.metadata.created_at {
        report.push(
            format!("{field}.metadata.lastModifiedAt"),
            "must not precede createdAt",
        );
    }
}

fn check_banner(report: &mut ValidationReport, banner: &BannerPayload) {
    if banner.headline.trim().is_empty() {
        report.push("payload.headline", "must not be empty");
    }
    if let Some(image) = &banner.background_image {
        check_image(report, "payload.backgroundImage", image);
    }
    if let Some(cta) = &banner.call_to_action {
        check_required_text(report, "payload.callToAction.buttonText", &cta.button_text);
        check_url(report, "payload.callToAction.linkUrl", &cta.link_url);
    }
}

fn check_card(report: &mut ValidationReport, card: &CardPayload) {
    check_required_text(report, "payload.title", &card.title);
    check_rich_text(report, "payload.description", &card.description);
    if let Some(image) = &card.image {
        check_image(report, "payload.image", image);
    }
    if let Some(link) = &card.link {
        check_url(report, "payload.link.url", &link.url);
        check_text_len(report, "payload.link.text", &link.text);
    }
}

/// Report every key that appears more than once, once per repeat
fn check_unique<I>(report: &mut ValidationReport, field: &str, what: &str, keys: I)
where
    I: IntoIterator<Item = (usize, String)>,
{
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    for (index, key) in keys {
        if let Some(first) = first_seen.get(&key) {
            report.push(
                format!("{field}[{index}].{what}"),
                format!("duplicates {field}[{first}] ({key})"),
            );
        } else {
            first_seen.insert(key, index);
        }
    }
}

fn check_accordion(report: &mut ValidationReport, acc: &AccordionPayload) {
    if acc.items.is_empty() {
        report.push("payload.items", "an accordion must keep at least one item");
    }
    for (i, item) in acc.items.iter().enumerate() {
        let base = format!("payload.items[{i}]");
        check_required_text(report, &format!("{base}.id"), &item.id);
        check_required_text(report, &format!("{base}.header"), &item.header);
        check_rich_text(report, &format!("{base}.content"), &item.content);
    }
    check_unique(
        report,
        "payload.items",
        "id",
        acc.items.iter().enumerate().map(|(i, it)| (i, it.id.clone())),
    );
    check_unique(
        report,
        "payload.items",
        "order",
        acc.items.iter().enumerate().map(|(i, it)| (i, it.order.to_string())),
    );
    if !acc.allow_multiple_open {
        let open = acc.items.iter().filter(|it| it.is_open).count();
        if open > 1 {
            report.push(
                "payload.items",
                format!("{open} items are open but allowMultipleOpen is false"),
            );
        }
    }
}

fn check_link_group(report: &mut ValidationReport, group: &LinkGroupPayload) {
    if group.links.is_empty() {
        report.push("payload.links", "a link group must keep at least one link");
    }
    for (i, link) in group.links.iter().enumerate() {
        let base = format!("payload.links[{i}]");
        check_required_text(report, &format!("{base}.id"), &link.id);
        check_required_text(report, &format!("{base}.linkText"), &link.link_text);
        check_url(report, &format!("{base}.linkUrl"), &link.link_url);
    }
    check_unique(
        report,
        "payload.links",
        "id",
        group.links.iter().enumerate().map(|(i, l)| (i, l.id.clone())),
    );
    check_unique(
        report,
        "payload.links",
        "linkText",
        group.links.iter().enumerate().map(|(i, l)| (i, l.link_text.clone())),
    );
    check_unique(
        report,
        "payload.links",
        "order",
        group.links.iter().enumerate().map(|(i, l)| (i, l.order.to_string())),
    );
}
