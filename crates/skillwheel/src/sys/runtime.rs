use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the file watcher and the Ctrl-C listener on a tokio runtime in a background thread.
pub fn start_background_services(watched: Vec<PathBuf>, tx: Sender<AppEvent>) {
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
                    crate::config::run_async_watcher(watched, tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        log::error!("Failed to listen for Ctrl-C: {}", e);
                        return;
                    }
                    let _ = tx.send(AppEvent::Quit).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
