//! Microsoft Teams Adaptive Card payload.
//!
//! The message shape is fixed: one envelope holding one attachment holding
//! one card. Only the text block contents vary between alerts.

use serde::Serialize;

use crate::alert::AlertRecord;

const MESSAGE_TYPE: &str = "message";
const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const CARD_TYPE: &str = "AdaptiveCard";
const CARD_VERSION: &str = "1.4";
const CARD_WIDTH: &str = "Full";
const TEXT_BLOCK: &str = "TextBlock";

/// Build the Teams message for an alert.
///
/// `date` is used as given; convert it beforehand if needed. With
/// `include_header` the card starts with an emphasized alert-id line.
#[must_use]
pub fn build_message(alert: &AlertRecord, date: &str, include_header: bool) -> TeamsMessage {
    let mut body = Vec::with_capacity(4);

    if include_header {
        body.push(TextBlock {
            weight: Some("bolder"),
            size: Some("Large"),
            ..TextBlock::new(format!("⚠️ Alert: {}", alert.alert_id), false)
        });
    }

    body.push(TextBlock::new(
        format!("ㆍ Service Name: {}", alert.service_name),
        true,
    ));
    body.push(TextBlock::new(format!("ㆍ Reason: {}", alert.reason), true));
    body.push(TextBlock::new(format!("ㆍ Date: {date}"), true));

    TeamsMessage {
        message_type: MESSAGE_TYPE,
        attachments: [Attachment {
            content_type: CARD_CONTENT_TYPE,
            content: AdaptiveCard {
                schema: CARD_SCHEMA,
                card_type: CARD_TYPE,
                version: CARD_VERSION,
                msteams: MsTeams { width: CARD_WIDTH },
                body,
            },
        }],
    }
}

// =============================================================================
// Teams API types
// =============================================================================

/// Envelope posted to the webhook.
#[derive(Debug, Clone, Serialize)]
pub struct TeamsMessage {
    #[serde(rename = "type")]
    message_type: &'static str,
    attachments: [Attachment; 1],
}

impl TeamsMessage {
    /// The card carried by this message.
    #[must_use]
    pub fn card(&self) -> &AdaptiveCard {
        &self.attachments[0].content
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Attachment {
    content_type: &'static str,
    content: AdaptiveCard,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "$schema")]
    schema: &'static str,
    #[serde(rename = "type")]
    card_type: &'static str,
    version: &'static str,
    msteams: MsTeams,
    body: Vec<TextBlock>,
}

impl AdaptiveCard {
    #[must_use]
    pub fn body(&self) -> &[TextBlock] {
        &self.body
    }
}

#[derive(Debug, Clone, Serialize)]
struct MsTeams {
    width: &'static str,
}

/// A single line of card text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    block_type: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    pub wrap: bool,
}

impl TextBlock {
    fn new(text: String, wrap: bool) -> Self {
        Self {
            block_type: TEXT_BLOCK,
            text,
            weight: None,
            size: None,
            wrap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_alert() -> AlertRecord {
        AlertRecord::new("A-42", "checkout", "latency p99 > 2s", "2024-01-02T15:04:05Z")
    }

    #[test]
    fn test_full_card_matches_wire_format() {
        let message = build_message(&sample_alert(), "2024-01-03 00:04:05", true);
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "message",
                "attachments": [{
                    "contentType": "application/vnd.microsoft.card.adaptive",
                    "content": {
                        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
                        "type": "AdaptiveCard",
                        "version": "1.4",
                        "msteams": {"width": "Full"},
                        "body": [
                            {"type": "TextBlock", "text": "⚠️ Alert: A-42", "weight": "bolder", "size": "Large", "wrap": false},
                            {"type": "TextBlock", "text": "ㆍ Service Name: checkout", "wrap": true},
                            {"type": "TextBlock", "text": "ㆍ Reason: latency p99 > 2s", "wrap": true},
                            {"type": "TextBlock", "text": "ㆍ Date: 2024-01-03 00:04:05", "wrap": true}
                        ]
                    }
                }]
            })
        );
    }

    #[test]
    fn test_headerless_card_has_three_blocks() {
        let message = build_message(&sample_alert(), "raw", false);
        let texts: Vec<&str> = message
            .card()
            .body()
            .iter()
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                "ㆍ Service Name: checkout",
                "ㆍ Reason: latency p99 > 2s",
                "ㆍ Date: raw"
            ]
        );
        assert!(message.card().body().iter().all(|b| b.wrap));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let alert = AlertRecord::new("", "", "", "");
        let value = serde_json::to_value(build_message(&alert, "", true)).unwrap();
        let body = value["attachments"][0]["content"]["body"]
            .as_array()
            .unwrap();
        assert_eq!(body.len(), 4);
        assert_eq!(body[0]["text"], "⚠️ Alert: ");
        assert_eq!(body[3]["text"], "ㆍ Date: ");
        assert_eq!(body[1].get("weight"), None);
        assert_eq!(body[1]["wrap"], Value::Bool(true));
    }

    #[test]
    fn test_text_passed_through_verbatim() {
        let alert = AlertRecord::new("x", "svc \"quoted\"", "line1\nline2\t\u{7}", "d");
        let message = build_message(&alert, "d", false);
        assert_eq!(message.card().body()[1].text, "ㆍ Reason: line1\nline2\t\u{7}");

        let encoded = serde_json::to_string(&message).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            decoded["attachments"][0]["content"]["body"][0]["text"],
            "ㆍ Service Name: svc \"quoted\""
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let first = serde_json::to_vec(&build_message(&sample_alert(), "d", true)).unwrap();
        let second = serde_json::to_vec(&build_message(&sample_alert(), "d", true)).unwrap();
        assert_eq!(first, second);
    }
}
