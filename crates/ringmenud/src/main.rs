use ringmenu::Href;
use ringmenud::app::App;
use ringmenud::config;
use ringmenud::sys::runtime;
use ringmenud::tween::TweenEngine;
use tokio::runtime::Runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(256);

    let rt = Runtime::new()?;
    rt.block_on(async move {
        // Start Background Services
        runtime::start_background_services(tx.clone());

        let mut app = App::new(&config, TweenEngine::new(tx));

        while let Ok(event) = rx.recv().await {
            if let Some(href) = app.update(event) {
                open_target(&href);
            }
        }
    });

    Ok(())
}

fn open_target(href: &Href) {
    log::info!("Navigating to {}", href);
    if let Err(e) = std::process::Command::new("xdg-open")
        .arg(href.as_str())
        .spawn()
    {
        log::error!("Failed to open '{}': {}", href, e);
    }
}
