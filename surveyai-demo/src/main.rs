mod config;
mod terminal;
mod wizard;

use surveyai::{AppContext, AuthoringSession, MockGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::wizard::{Wizard, WizardError};

fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(std::io::stderr)
        .init();

    let language = config.language()?;
    info!(%language, "starting demo");

    let session = AuthoringSession::with_generator(MockGenerator)
        .with_channel_settings(&config.timings, language);
    let app = AppContext::new(session, config.timings.clone());

    match Wizard::new(app, config.plain).run() {
        Ok(()) | Err(WizardError::Cancelled) => {
            println!("Goodbye!");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
