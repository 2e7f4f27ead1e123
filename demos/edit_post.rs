//! Edit one post from the command line.
//!
//! ```text
//! SMF_USER=me SMF_PASSWORD=secret SMF_MSG=433374 SMF_TOPIC=45557.0 \
//! SMF_MESSAGE="new body" RUST_LOG=smfedit=debug cargo run --example edit_post
//! ```
//!
//! Optional: `SMF_SUBJECT`, `SMF_FORUM_URL`, `SMF_DUMP_DIR`, `SMF_DEBUG=1`.

use smfedit::{Credentials, EditRequest, FieldOverrides, ForumConfig, ForumEditor};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use url::Url;

fn required(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} is not set", name))
}

fn config_from_env() -> Result<ForumConfig, String> {
    let mut config = match env::var("SMF_FORUM_URL") {
        Ok(raw) => ForumConfig::new(Url::parse(&raw).map_err(|e| format!("SMF_FORUM_URL: {}", e))?),
        Err(_) => ForumConfig::default(),
    };
    config.timeout_secs = Some(30);
    config.dump_dir = env::var_os("SMF_DUMP_DIR").map(Into::into);
    Ok(config)
}

fn overrides_from_env() -> Result<FieldOverrides, String> {
    let mut overrides = FieldOverrides::new();
    for (var, field) in [("SMF_MESSAGE", "message"), ("SMF_SUBJECT", "subject")] {
        if let Ok(value) = env::var(var) {
            overrides = overrides
                .parse_field(field, &value)
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(overrides)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smfedit=info")),
        )
        .init();

    let setup = (|| {
        let credentials = Credentials::new(required("SMF_USER")?, required("SMF_PASSWORD")?);
        let message_id = required("SMF_MSG")?
            .parse::<u64>()
            .map_err(|e| format!("SMF_MSG: {}", e))?;
        let request = EditRequest::new(message_id, required("SMF_TOPIC")?, overrides_from_env()?);
        Ok::<_, String>((config_from_env()?, credentials, request))
    })();

    let (config, credentials, request) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let debug = env::var("SMF_DEBUG").is_ok_and(|v| v == "1");
    let editor = ForumEditor::new(config).debug(debug);
    match editor.edit(&credentials, &request).await {
        Ok(outcome) => {
            println!("submitted; check {}", outcome.permalink());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error ({}): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
