//! `gitclock remote`: the Rust remote editor against a running device.

use std::time::Duration;

use gitclock_bridge::RemoteEditor;
use gitclock_common::GitClockError;
use gitclock_layout::WidgetId;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::RemoteAction;
use crate::device::{format_placements, render};

pub async fn run(url: String, action: RemoteAction, poll_interval: Duration) -> Result<(), GitClockError> {
    let editor = RemoteEditor::new(url)?;
    match action {
        RemoteAction::Watch { interval_ms } => {
            let interval = interval_ms.map(Duration::from_millis).unwrap_or(poll_interval);
            watch(&editor, interval).await
        }
        RemoteAction::Nudge { widget, dx, dy } => {
            let id = parse_widget(&widget)?;
            editor.poll_once().await?;
            editor.begin_drag(id);
            editor.drag_by(dx, dy);
            if let Some(layout) = editor.end_drag().await? {
                println!("{id}: x={:.1} y={:.1}", layout.x, layout.y);
            }
            Ok(())
        }
        RemoteAction::Scale { widget, scale } => {
            let id = parse_widget(&widget)?;
            editor.poll_once().await?;
            let layout = editor.set_scale(id, scale).await?;
            println!("{id}: scale={:.2}", layout.scale);
            Ok(())
        }
        RemoteAction::Reset => {
            editor.reset().await?;
            println!("layout reset");
            Ok(())
        }
    }
}

async fn watch(editor: &RemoteEditor, interval: Duration) -> Result<(), GitClockError> {
    editor.poll_once().await?;
    let mut last = editor.view();
    print!("{}", format_placements(&render(&last.layout, last.geometry)));

    let cancel = CancellationToken::new();
    let task = editor.spawn_polling(interval, cancel.clone());
    info!("watching {} every {}ms", editor.base_url(), interval.as_millis());

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let view = editor.view();
                if view != last {
                    print!("{}", format_placements(&render(&view.layout, view.geometry)));
                    last = view;
                }
            }
        }
    }

    stop_polling(cancel, task).await;
    Ok(())
}

/// Cancel the polling task and wait for it. Returns `false` if it panicked
/// or was aborted.
async fn stop_polling(cancel: CancellationToken, task: JoinHandle<()>) -> bool {
    cancel.cancel();
    match task.await {
        Ok(()) => true,
        Err(e) => {
            warn!("remote polling task ended abnormally: {e}");
            false
        }
    }
}

fn parse_widget(name: &str) -> Result<WidgetId, GitClockError> {
    name.parse()
        .map_err(|e: gitclock_layout::UnknownWidget| GitClockError::Other(e.to_string()))
}
