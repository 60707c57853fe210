use anyhow::bail;
use clap::Subcommand;
use quill_config::Config;
use quill_core_email_panel_contracts::{
    retry::EmailRetryOutcome, EmailPanelFeatureService, SendTestEmailResult,
};
use quill_di::Provide;
use quill_models::post::PostId;
use tracing::info;

use super::{get_post, post::print_post};
use crate::environment::{
    types::{EmailPanelFeature, PostApi},
    Provider,
};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test version of a post's newsletter
    #[command(aliases(["t"]))]
    SendTest {
        post_id: PostId,
        /// Recipient of the test email [default: the session user's email]
        #[arg(long)]
        to: Option<String>,
    },
    /// Resend a failed newsletter and wait for the outcome
    #[command(aliases(["r"]))]
    Retry { post_id: PostId },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut provider = Provider::from_config(&config)?;

        match self {
            EmailCommand::SendTest { post_id, to } => send_test(&mut provider, post_id, to).await,
            EmailCommand::Retry { post_id } => retry(&mut provider, post_id).await,
        }
    }
}

async fn send_test(
    provider: &mut Provider,
    post_id: PostId,
    to: Option<String>,
) -> anyhow::Result<()> {
    let post_api: PostApi = provider.provide();
    let email_panel: EmailPanelFeature = provider.provide();

    let post = get_post(&post_api, &post_id).await?;
    if let Some(to) = to {
        email_panel.set_test_email_address(to).await;
    }

    match email_panel.send_test_email(&post).await {
        SendTestEmailResult::Sent(response) => {
            info!("Test email sent to {}", email_panel.test_email_address().await);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        SendTestEmailResult::Failed(_) => bail!(email_panel.send_test_email_error().await),
        SendTestEmailResult::Dropped => bail!("A test email is already being sent"),
    }

    Ok(())
}

async fn retry(provider: &mut Provider, post_id: PostId) -> anyhow::Result<()> {
    let post_api: PostApi = provider.provide();
    let email_panel: EmailPanelFeature = provider.provide();

    let mut post = get_post(&post_api, &post_id).await?;
    let outcome = email_panel.retry_email(&mut post).await?;
    print_post(&post);

    match outcome {
        EmailRetryOutcome::Submitted => println!("The newsletter was resent."),
        EmailRetryOutcome::TimedOut => {
            println!("The newsletter is still being sent, check again later.")
        }
        EmailRetryOutcome::Skipped => println!("Nothing to retry."),
    }

    Ok(())
}
