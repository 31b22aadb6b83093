use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use log::{error, warn};

use super::Battle;

/// Environment variable naming the JSON-lines file battles are appended to.
pub const JOURNAL_FILE_ENV: &str = "BATTLE_JOURNAL_FILE";

/// Append-only JSON-lines journal of stored battles, written off the request path.
#[derive(Clone, Debug)]
pub struct BattleJournal {
    // Shared optional sender so close() can take the sender and drop it.
    sender: Arc<Mutex<Option<Sender<Battle>>>>,
    handle: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl BattleJournal {
    pub fn new(path: PathBuf) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let (tx, rx) = mpsc::channel::<Battle>();
        let handle = thread::spawn(move || {
            let mut writer = BufWriter::new(file);
            for battle in rx {
                match serde_json::to_vec(&battle) {
                    Ok(mut bytes) => {
                        bytes.push(b'\n');
                        if let Err(e) = writer.write_all(&bytes).and_then(|_| writer.flush()) {
                            error!("battle journal {:?}: write failed: {}", path, e);
                        }
                    }
                    Err(e) => error!("battle journal: could not encode battle {}: {}", battle.id, e),
                }
            }
            let _ = writer.flush();
        });

        Ok(BattleJournal {
            sender: Arc::new(Mutex::new(Some(tx))),
            handle: Arc::new(Mutex::new(Some(handle))),
        })
    }

    /// Open the journal named by `BATTLE_JOURNAL_FILE`, if any.
    pub fn from_env() -> Option<Self> {
        let path = std::env::var(JOURNAL_FILE_ENV).ok()?;
        match BattleJournal::new(PathBuf::from(&path)) {
            Ok(journal) => Some(journal),
            Err(e) => {
                warn!("battle journal disabled, cannot open {}: {}", path, e);
                None
            }
        }
    }

    /// Best effort: a closed journal silently drops the record.
    pub fn send(&self, battle: Battle) {
        let guard = match self.sender.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(tx) = &*guard {
            let _ = tx.send(battle);
        }
    }

    /// Drop the sender and join the writer thread so pending lines are flushed.
    pub fn close(&self) {
        match self.sender.lock() {
            Ok(mut g) => *g = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        let handle = match self.handle.lock() {
            Ok(mut h) => h.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(h) = handle {
            let _ = h.join();
        }
    }
}
