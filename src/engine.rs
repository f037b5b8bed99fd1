// src/engine.rs
use std::borrow::Cow;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use anyhow::Context as _;
use eframe::egui;
use sigview::{decode_bytes, DecodeConfig, LoadOutcome};

use crate::types::{FileSource, GuiCommand, LoaderMessage};

/// Background loader. Reads whole files off the UI thread and decodes them; results
/// come back in request order, so the most recent request is applied last.
pub fn spawn_thread(
    tx: Sender<LoaderMessage>,
    rx_cmd: Receiver<GuiCommand>,
    ctx: egui::Context,
) -> JoinHandle<()> {
    thread::spawn(move || {
        tx.send(LoaderMessage::Log("Loader ready.".to_owned())).ok();

        while let Ok(cmd) = rx_cmd.recv() {
            match cmd {
                GuiCommand::Load { source, config } => {
                    let outcome = load(&source, &config, &tx);
                    if tx.send(LoaderMessage::Loaded(outcome)).is_err() {
                        break;
                    }
                    ctx.request_repaint();
                }
            }
        }
        log::debug!("loader thread exiting");
    })
}

fn load(source: &FileSource, config: &DecodeConfig, tx: &Sender<LoaderMessage>) -> LoadOutcome {
    let name = source.display_name();
    match read_source(source) {
        Ok(bytes) => decode_bytes(&name, &bytes, config),
        Err(err) => {
            log::warn!("{err:#}");
            tx.send(LoaderMessage::Log(format!("Could not read {name}"))).ok();
            LoadOutcome::unreadable(&name)
        }
    }
}

fn read_source(source: &FileSource) -> anyhow::Result<Cow<'_, [u8]>> {
    match source {
        FileSource::Path(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Cow::Owned(bytes))
        }
        FileSource::Bytes { bytes, .. } => Ok(Cow::Borrowed(&bytes[..])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::sync::Arc;
    use std::time::Duration;

    fn next_outcome(rx: &Receiver<LoaderMessage>) -> LoadOutcome {
        loop {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                LoaderMessage::Loaded(outcome) => return outcome,
                LoaderMessage::Log(_) => continue,
            }
        }
    }

    #[test]
    fn loads_in_request_order() {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        let handle = spawn_thread(tx, rx_cmd, egui::Context::default());

        for (name, text) in [("a.csv", "i,v\n0,1\n"), ("b.csv", "i,v\n0,1\n1,2\n")] {
            tx_cmd
                .send(GuiCommand::Load {
                    source: FileSource::Bytes {
                        name: name.to_owned(),
                        bytes: Arc::from(text.as_bytes()),
                    },
                    config: DecodeConfig::default(),
                })
                .unwrap();
        }
        let first = next_outcome(&rx);
        let second = next_outcome(&rx);
        assert_eq!(first.file_name, "a.csv");
        assert_eq!(second.file_name, "b.csv");
        assert_eq!(second.series.len(), 2);

        drop(tx_cmd);
        handle.join().unwrap();
    }

    #[test]
    fn missing_file_yields_empty_outcome() {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        let _handle = spawn_thread(tx, rx_cmd, egui::Context::default());
        tx_cmd
            .send(GuiCommand::Load {
                source: FileSource::Path("/definitely/not/here.json".into()),
                config: DecodeConfig::default(),
            })
            .unwrap();
        let outcome = next_outcome(&rx);
        assert_eq!(outcome.file_name, "here.json");
        assert!(outcome.series.is_empty());
        assert!(outcome.summary.is_none());
    }
}
