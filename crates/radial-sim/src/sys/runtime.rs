use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// Read frames from stdin and, with `watch` set, reload when that config file
/// changes. Both run on a runtime owned by a background thread.
pub fn start_background_services(tx: Sender<AppEvent>, watch: Option<PathBuf>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                let _ = tx.send_blocking(AppEvent::Quit);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::feed::run_feed(tx).await;
                });
            }

            if let Some(config_path) = watch {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(config_path, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
