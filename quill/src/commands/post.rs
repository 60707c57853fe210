use clap::Subcommand;
use quill_config::Config;
use quill_core_email_panel_contracts::EmailPanelFeatureService;
use quill_di::Provide;
use quill_models::post::{Post, PostId};

use super::get_post;
use crate::environment::{
    types::{EmailPanelFeature, PostApi},
    Provider,
};

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Show the email settings of a post
    #[command(aliases(["s"]))]
    Show { post_id: PostId },
    /// Change the email subject of a post
    SetSubject {
        post_id: PostId,
        /// The new subject; an empty subject falls back to the post title
        subject: String,
    },
}

impl PostCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut provider = Provider::from_config(&config)?;

        match self {
            PostCommand::Show { post_id } => show(&mut provider, post_id).await,
            PostCommand::SetSubject { post_id, subject } => {
                set_subject(&mut provider, post_id, subject).await
            }
        }
    }
}

async fn show(provider: &mut Provider, post_id: PostId) -> anyhow::Result<()> {
    let post_api: PostApi = provider.provide();
    let email_panel: EmailPanelFeature = provider.provide();

    let post = get_post(&post_api, &post_id).await?;
    print_post(&post);
    println!("mail enabled:  {}", email_panel.mailgun_is_enabled());
    println!("test email to: {}", email_panel.test_email_address().await);

    Ok(())
}

async fn set_subject(
    provider: &mut Provider,
    post_id: PostId,
    subject: String,
) -> anyhow::Result<()> {
    let post_api: PostApi = provider.provide();
    let email_panel: EmailPanelFeature = provider.provide();

    let mut post = get_post(&post_api, &post_id).await?;
    email_panel.set_email_subject(&mut post, subject).await?;
    print_post(&post);

    Ok(())
}

pub(crate) fn print_post(post: &Post) {
    if let Some(id) = &post.id {
        println!("post:          {id}");
    }
    println!("title:         {}", post.title);
    println!("email subject: {}", post.effective_email_subject());
    match &post.email {
        Some(email) => {
            println!("email status:  {}", email.status);
            if let Some(error) = &email.error {
                println!("email error:   {error}");
            }
        }
        None => println!("email status:  not sent"),
    }
}
