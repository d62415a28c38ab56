//! Creature data fetching
//!
//! The game consumes creature data through the `CreatureSource` trait; the
//! real implementation talks to PokeAPI, tests substitute a stub.

pub mod pokeapi;

pub use pokeapi::PokeApiClient;

use crate::data::CreatureRecord;
use crate::game::{FetchRequest, RoundToken};
use crate::QuizError;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// The data-fetch collaborator the round engine depends on.
///
/// Implementations compose whatever requests they need; by the time a
/// record is returned it is complete and immutable for the round.
pub trait CreatureSource: Send + Sync {
    fn fetch_creature(&self, id: u32) -> Result<CreatureRecord, QuizError>;
}

/// Audio clip locator for a creature's cry. Pure; no network call.
pub fn cry_url(id: u32) -> String {
    format!("https://pokemoncries.com/cries/{}.mp3", id)
}

/// A fetch completion, tagged with the round it belongs to
pub type FetchCompletion = (RoundToken, Result<CreatureRecord, QuizError>);

/// Background fetch executor.
///
/// Runs `CreatureSource` calls on one worker thread so the event loop never
/// blocks on the network. Completions keep their round token; the session's
/// stale guard decides whether they still apply. There is no mid-flight
/// cancellation — a superseded fetch simply completes and gets dropped.
pub struct FetchWorker {
    job_tx: mpsc::Sender<FetchRequest>,
    result_rx: mpsc::Receiver<FetchCompletion>,
}

impl FetchWorker {
    pub fn spawn(source: Arc<dyn CreatureSource>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<FetchRequest>();
        let (result_tx, result_rx) = mpsc::channel();
        thread::spawn(move || {
            while let Ok(job) = job_rx.recv() {
                let result = source.fetch_creature(job.id);
                if result_tx.send((job.token, result)).is_err() {
                    break;
                }
            }
        });
        Self { job_tx, result_rx }
    }

    pub fn submit(&self, request: FetchRequest) {
        // A send error means the worker is gone; the round then just stays
        // in Loading until the player skips it.
        if self.job_tx.send(request).is_err() {
            tracing::warn!("fetch worker is no longer running");
        }
    }

    pub fn try_recv(&self) -> Option<FetchCompletion> {
        self.result_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cry_url_embeds_the_identifier() {
        assert_eq!(cry_url(25), "https://pokemoncries.com/cries/25.mp3");
        assert_eq!(cry_url(1), "https://pokemoncries.com/cries/1.mp3");
    }
}
