use openstaty_share::ShareIntent;
use serde::{Deserialize, Serialize};

/// Response from the native `takeLaunchIntent` / `takeNewIntent` calls.
///
/// The native side lifts `EXTRA_STREAM` and `EXTRA_TEXT` out of the intent
/// and hands the intent over at most once.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub intent: Option<ShareIntent>,
}

/// Payload for native content-resolver calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest<'a> {
    pub uri: &'a str,
}

/// Response from the native `queryDisplayName` call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNameResponse {
    pub display_name: Option<String>,
}

/// Response from the native `openContent` call.
///
/// Android detaches a file descriptor from the content resolver's
/// `ParcelFileDescriptor`; iOS hands back a path inside the app group
/// container instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenContentResponse {
    /// Descriptor from `ParcelFileDescriptor.detachFd()`. The native side
    /// must not close or reuse it after returning; Rust owns and closes it.
    /// Never one of the stdio descriptors.
    pub fd: Option<i32>,
    pub path: Option<String>,
}

impl OpenContentResponse {
    /// The descriptor, if it is one Rust may take ownership of. Stdio and
    /// negative descriptors never are.
    pub fn adoptable_fd(&self) -> Option<i32> {
        self.fd.filter(|fd| *fd > 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openstaty_share::{ContentRef, IntentAction};

    #[test]
    fn test_intent_response_from_native() {
        let json = r#"{
            "intent": {
                "action": "android.intent.action.SEND",
                "stream": "content://com.whatsapp.provider.media/export/1"
            }
        }"#;
        let response: IntentResponse = serde_json::from_str(json).unwrap();
        let intent = response.intent.unwrap();

        assert_eq!(intent.action, IntentAction::Send);
        assert_eq!(
            intent.stream,
            Some(ContentRef::new("content://com.whatsapp.provider.media/export/1"))
        );
    }

    #[test]
    fn test_empty_intent_response() {
        let response: IntentResponse = serde_json::from_str(r#"{ "intent": null }"#).unwrap();
        assert!(response.intent.is_none());
    }

    #[test]
    fn test_open_content_response() {
        let response: OpenContentResponse = serde_json::from_str(r#"{ "fd": 57 }"#).unwrap();
        assert_eq!(response.fd, Some(57));
        assert_eq!(response.adoptable_fd(), Some(57));
        assert_eq!(response.path, None);
    }

    #[test]
    fn test_stdio_and_negative_fds_are_not_adopted() {
        for fd in [-1, 0, 1, 2] {
            let response = OpenContentResponse {
                fd: Some(fd),
                path: None,
            };
            assert_eq!(response.adoptable_fd(), None, "fd {}", fd);
        }
        assert_eq!(OpenContentResponse::default().adoptable_fd(), None);
    }
}
