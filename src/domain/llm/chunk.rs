use serde::Deserialize;

/// One `data:` payload of a streamed chat completion.
///
/// Only the fields the relay reads are modelled; everything else in the
/// payload (`id`, `model`, `prompt_filter_results`, ...) is ignored.
#[derive(Debug, Deserialize)]
pub struct CompletionChunk {
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: Option<ChunkDelta>,
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionChunk {
    /// Text carried by the first choice, empty when there is none.
    pub fn first_delta_text(&self) -> &str {
        self.choices
            .first()
            .and_then(|choice| choice.delta.as_ref())
            .and_then(|delta| delta.content.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CompletionChunk {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_delta_text() {
        let chunk = parse(
            r#"{"id":"chatcmpl-6pULPSegWhFgi0XQ1DtgA3zTa1WR6","object":"chat.completion.chunk",
                "created":1677729391,"model":"gpt-3.5-turbo-0301",
                "choices":[{"delta":{"content":"你"},"index":0,"finish_reason":null}]}"#,
        );
        assert_eq!(chunk.first_delta_text(), "你");
        assert_eq!(chunk.choices[0].index, Some(0));
    }

    #[test]
    fn test_missing_or_null_content_is_empty() {
        assert_eq!(parse(r#"{"choices":[{"delta":{},"index":0}]}"#).first_delta_text(), "");
        assert_eq!(
            parse(r#"{"choices":[{"delta":{"content":null},"finish_reason":"stop"}]}"#)
                .first_delta_text(),
            ""
        );
        assert_eq!(parse(r#"{"choices":[{"index":0}]}"#).first_delta_text(), "");
    }

    #[test]
    fn test_only_first_choice_is_read() {
        let chunk = parse(
            r#"{"choices":[{"delta":{"content":"a"}},{"delta":{"content":"b"}}]}"#,
        );
        assert_eq!(chunk.first_delta_text(), "a");
    }

    #[test]
    fn test_empty_choices() {
        let chunk = parse(r#"{"choices":[],"prompt_filter_results":[]}"#);
        assert_eq!(chunk.first_delta_text(), "");
    }

    #[test]
    fn test_missing_choices_is_rejected() {
        assert!(serde_json::from_str::<CompletionChunk>(r#"{"error":{"message":"x"}}"#).is_err());
    }
}
