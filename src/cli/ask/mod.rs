//! Ask command - streams a single completion to stdout

use anyhow::{Context, bail};
use clap::Args;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::RelaySettings;
use crate::domain::ChatMessage;
use crate::infrastructure::llm::{
    HttpClient, HttpClientTrait, adapt, build_request, build_url,
};

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The user prompt
    pub prompt: String,

    /// Optional system message sent before the prompt
    #[arg(long)]
    pub system: Option<String>,
}

impl AskArgs {
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(&self.prompt));
        messages
    }
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    super::bootstrap()?;
    let settings = RelaySettings::from_env()?;
    let api_key = settings.require_api_key()?;

    let client = HttpClient::from_proxy(settings.https_proxy.as_deref())?;
    let spec = build_request(&settings.provider, api_key, &args.messages());
    let url = build_url(&settings.provider, &settings.base_url);

    info!(provider = settings.provider.kind.as_str(), "Sending prompt");
    let upstream = client.send(&url, &spec).await?;

    let cancel = CancellationToken::new();
    let response = adapt(upstream, cancel.clone());
    let status = response.status();

    if !status.is_success() {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read upstream error body")?;
        bail!(
            "upstream returned {}: {}",
            status,
            String::from_utf8_lossy(&body)
        );
    }

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let mut stdout = tokio::io::stdout();
    let mut body = response.into_body().into_data_stream();
    let mut written = 0usize;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.context("completion stream failed")?;
        written += chunk.len();
        stdout.write_all(&chunk).await?;
        stdout.flush().await?;
    }

    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    debug!(bytes = written, cancelled = cancel.is_cancelled(), "Completion finished");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;

    #[test]
    fn test_messages_with_system() {
        let args = AskArgs {
            prompt: "What is Rust?".to_string(),
            system: Some("Answer in one line.".to_string()),
        };

        let messages = args.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1], ChatMessage::user("What is Rust?"));
    }

    #[test]
    fn test_messages_without_system() {
        let args = AskArgs {
            prompt: "hi".to_string(),
            system: None,
        };
        assert_eq!(args.messages(), vec![ChatMessage::user("hi")]);
    }
}
