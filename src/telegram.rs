//! Telegram profile access over one long-lived MTProto session.

use std::io::{self, BufRead as _, Write as _};

use anyhow::{Context as _, Result};
use grammers_client::{grammers_tl_types as tl, session::Session, Client, Config, InitParams, SignInError};
use tracing::{debug, info};

const SESSION_FILE: &str = "nowbio.session";

/// Telegram client holding the authorized user session
pub struct ProfileClient {
    client: Client,
}

impl ProfileClient {
    /// Connect to Telegram, signing in interactively if the saved session
    /// is missing or no longer authorized.
    pub async fn connect(api_id: i32, api_hash: &str) -> Result<Self> {
        let session = Session::load_file_or_create(SESSION_FILE)
            .context("Failed to load Telegram session file")?;
        let client = Client::connect(Config {
            session,
            api_id,
            api_hash: api_hash.to_owned(),
            params: InitParams::default(),
        })
        .await
        .context("Failed to connect to Telegram")?;

        if !client.is_authorized().await? {
            sign_in(&client).await?;
            client
                .session()
                .save_to_file(SESSION_FILE)
                .context("Failed to save Telegram session")?;
        }
        debug!("Telegram client ready");
        Ok(Self { client })
    }

    /// Fetch the current profile text of the signed-in account.
    pub async fn profile_text(&self) -> Result<String> {
        let tl::enums::users::UserFull::Full(full) = self
            .client
            .invoke(&tl::functions::users::GetFullUser {
                id: tl::enums::InputUser::UserSelf,
            })
            .await
            .context("Failed to fetch own profile")?;
        let tl::enums::UserFull::Full(user) = full.full_user;
        Ok(user.about.unwrap_or_default())
    }

    /// Overwrite the profile text of the signed-in account.
    pub async fn set_profile_text(&self, text: &str) -> Result<()> {
        self.client
            .invoke(&tl::functions::account::UpdateProfile {
                first_name: None,
                last_name: None,
                about: Some(text.to_owned()),
            })
            .await
            .context("Failed to update profile")?;
        Ok(())
    }
}

async fn sign_in(client: &Client) -> Result<()> {
    info!("No authorized Telegram session found, signing in");
    let phone = prompt("Enter your phone number (international format): ")?;
    let token = client
        .request_login_code(&phone)
        .await
        .context("Failed to request login code")?;
    let code = prompt("Enter the login code you received: ")?;

    match client.sign_in(&token, &code).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let hint = password_token.hint().unwrap_or("none");
            let password = prompt(&format!("Enter your 2FA password (hint: {hint}): "))?;
            client
                .check_password(password_token, password.trim())
                .await
                .context("2FA password check failed")?;
        }
        Err(e) => return Err(e).context("Telegram sign-in failed"),
    }
    info!("Signed in successfully");
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_owned())
}
