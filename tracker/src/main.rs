use snafu::ResultExt;
use tracker::{
    error::{Error, error::SettingsSnafu},
    settings::Settings,
    startup::App,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::new().context(SettingsSnafu)?;
    settings.init_tracing();

    let app = App::build(settings)?;

    app.run().await;

    Ok(())
}
