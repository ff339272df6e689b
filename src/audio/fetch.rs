//! Preview fetch off the event-loop thread.
//!
//! Each request runs on its own thread and reports through a channel. A newer
//! request does not cancel an older one; callers drop outcomes whose id is no
//! longer the one they wait for.

use std::fs;
use std::sync::mpsc::Sender;
use std::thread;

use crate::catalog::Track;
use crate::error::{Error, Result};

use super::types::{FetchOutcome, RequestId};

pub struct PreviewFetcher {
    next_id: RequestId,
    tx: Sender<FetchOutcome>,
}

impl PreviewFetcher {
    pub fn new(tx: Sender<FetchOutcome>) -> Self {
        Self { next_id: 0, tx }
    }

    /// Start fetching `track`'s preview bytes.
    ///
    /// Fails right away with `MissingPreviewAsset` when the track has no preview.
    pub fn request(&mut self, track: &Track) -> Result<RequestId> {
        let path = track
            .preview
            .clone()
            .ok_or_else(|| Error::MissingPreviewAsset(track.id.clone()))?;

        self.next_id += 1;
        let id = self.next_id;
        let tx = self.tx.clone();
        let track_id = track.id.clone();

        thread::Builder::new()
            .name("preview-fetch".into())
            .spawn(move || {
                let result = fs::read(&path).map_err(Error::from);
                if let Err(e) = &result {
                    log::warn!("preview fetch for {track_id:?} failed: {e}");
                }
                // The receiver is gone when the app is shutting down.
                let _ = tx.send(FetchOutcome {
                    id,
                    track_id,
                    result,
                });
            })?;

        log::debug!("preview request {id} for {:?}", track.id);
        Ok(id)
    }
}
