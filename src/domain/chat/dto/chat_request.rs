use serde::Deserialize;
use serde_json::Value;

/// Inbound chat payload.
///
/// `input` and `history` stay loosely typed here on purpose: a malformed
/// history entry must be dropped by the service, not fail the whole body
/// decode, and a wrong-typed `input` must classify as invalid input rather
/// than an unparsable body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub history: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Role tag in Gemini wire format.
    pub fn as_gemini_role(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "model",
        }
    }
}

/// One validated conversation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    /// Shape-check one raw history entry: an object with a string `content`
    /// and a non-empty string role tag. Anything else is rejected (the
    /// caller drops it). An `assistant` tag maps to the assistant turn;
    /// every other tag, `user` included, is coerced to a user turn. Empty
    /// `content` is tolerated and passed through.
    pub fn from_value(entry: &Value) -> Option<ChatTurn> {
        let content = entry.get("content")?.as_str()?;
        let role = entry.get("role")?.as_str().filter(|r| !r.is_empty())?;

        let role = if role == "assistant" {
            TurnRole::Assistant
        } else {
            TurnRole::User
        };

        Some(ChatTurn {
            role,
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_entries_are_kept() {
        let turn = ChatTurn::from_value(&json!({ "role": "user", "content": "hi" })).unwrap();
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "hi");

        let turn = ChatTurn::from_value(&json!({ "role": "assistant", "content": "hello" })).unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.role.as_gemini_role(), "model");
    }

    #[test]
    fn unknown_roles_are_coerced_to_user() {
        // The web client injects a "system" context turn and expects it to
        // ride along as a user turn.
        let turn = ChatTurn::from_value(&json!({ "role": "system", "content": "ctx" })).unwrap();
        assert_eq!(turn.role, TurnRole::User);
    }

    #[test]
    fn empty_content_is_tolerated() {
        let turn = ChatTurn::from_value(&json!({ "role": "user", "content": "" })).unwrap();
        assert_eq!(turn.content, "");
    }

    #[test]
    fn malformed_entries_are_rejected() {
        for entry in [
            json!({ "role": "user" }),
            json!({ "content": "orphan" }),
            json!({ "role": "", "content": "x" }),
            json!({ "role": 5, "content": "x" }),
            json!({ "role": "user", "content": 42 }),
            json!("not an object"),
            json!(null),
        ] {
            assert!(ChatTurn::from_value(&entry).is_none(), "kept: {entry}");
        }
    }
}
