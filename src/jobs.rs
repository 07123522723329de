//! Background builds, polled by id from the thread that started them.
use crate::{error::Result, project::ProjectReport};
use flume::{Receiver, TryRecvError};
use serde::Serialize;
use std::{
    cell::RefCell,
    collections::hash_map::{Entry, HashMap},
    thread,
};

pub type JobId = String;

struct Build {
    rx: Receiver<Result<ProjectReport>>,
    handle: thread::JoinHandle<()>,
}

/// Where a background build stands. Serialized with a `status` tag, so a
/// finished job reads `{"status":"finished","report":{..}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Finished { report: ProjectReport },
    Failed { stage: &'static str, error: String },
    Panicked,
    Unknown,
}

#[derive(Default)]
struct Builds {
    running: HashMap<JobId, Build>,
    next_id: u64,
}

impl Builds {
    fn start<F>(&mut self, build: F) -> JobId
    where
        F: FnOnce() -> Result<ProjectReport> + Send + 'static,
    {
        let (tx, rx) = flume::bounded(1);
        let handle = thread::spawn(move || {
            let _ = tx.send(build());
            crate::log::close_all();
        });
        let id = format!("build-{}", self.next_id);
        self.next_id += 1;
        self.running.insert(id.clone(), Build { rx, handle });
        id
    }

    fn check(&mut self, id: &str) -> JobStatus {
        let Entry::Occupied(entry) = self.running.entry(id.to_owned()) else {
            return JobStatus::Unknown;
        };
        let status = match entry.get().rx.try_recv() {
            Ok(Ok(report)) => JobStatus::Finished { report },
            Ok(Err(error)) => JobStatus::Failed {
                stage: error.stage(),
                error: error.to_string(),
            },
            Err(TryRecvError::Disconnected) => JobStatus::Panicked,
            Err(TryRecvError::Empty) => return JobStatus::Pending,
        };
        let _ = entry.remove().handle.join();
        status
    }
}

thread_local! {
    static BUILDS: RefCell<Builds> = RefCell::default();
}

/// Runs `build` on its own thread and returns the id to poll it with.
pub fn start<F>(build: F) -> JobId
where
    F: FnOnce() -> Result<ProjectReport> + Send + 'static,
{
    BUILDS.with(|builds| builds.borrow_mut().start(build))
}

/// A build is forgotten once its outcome has been reported.
pub fn check(id: &str) -> JobStatus {
    BUILDS.with(|builds| builds.borrow_mut().check(id))
}
