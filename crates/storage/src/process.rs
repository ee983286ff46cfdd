//! Logical thread and process entities
//!
//! Operating systems recycle pids and tids, so the raw values cannot identify
//! a thread or process across a whole trace. The tracker hands out dense
//! [`UniqueTid`] / [`UniquePid`] values, one per observed lifetime, and keeps
//! the newest lifetime for each raw id as the "current" one.
//!
//! # Thread Safety
//!
//! None needed: ingestion is sequential, every mutation goes through
//! `&mut self`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;
use trackforge_core::traits::IdentityTracker;
use trackforge_core::types::{StringId, UniquePid, UniqueTid};

/// One logical thread lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadEntry {
    /// OS thread id
    pub tid: u32,
    /// Owning process, unset until the thread is associated
    pub upid: Option<UniquePid>,
    /// First timestamp of this lifetime, if known
    pub start_ts: Option<i64>,
}

/// One logical process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    /// OS process id
    pub pid: u32,
    /// Parent process, if known
    pub parent: Option<UniquePid>,
    /// Process name, `StringId::NULL` if unknown
    pub name: StringId,
    /// First timestamp of this lifetime, if known
    pub start_ts: Option<i64>,
}

/// Owner of logical thread/process entities
#[derive(Debug, Default)]
pub struct ProcessTracker {
    threads: Vec<ThreadEntry>,
    processes: Vec<ProcessEntry>,
    /// All lifetimes per tid, oldest first
    utids_by_tid: FxHashMap<u32, SmallVec<[UniqueTid; 2]>>,
    /// Current lifetime per pid
    upid_by_pid: FxHashMap<u32, UniquePid>,
}

impl ProcessTracker {
    /// Create a tracker with no entities
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a logical thread
    pub fn thread(&self, utid: UniqueTid) -> Option<&ThreadEntry> {
        self.threads.get(utid.value() as usize)
    }

    /// Look up a logical process
    pub fn process(&self, upid: UniquePid) -> Option<&ProcessEntry> {
        self.processes.get(upid.value() as usize)
    }

    /// Number of logical threads
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Number of logical processes
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Current logical process for `pid`, without creating one
    pub fn current_process(&self, pid: u32) -> Option<UniquePid> {
        self.upid_by_pid.get(&pid).copied()
    }

    /// All logical threads ever seen for `tid`, oldest first
    pub fn threads_for_tid(&self, tid: u32) -> &[UniqueTid] {
        self.utids_by_tid
            .get(&tid)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Newest thread for `tid` that is unassociated or belongs to `upid`
    fn matching_thread(&self, tid: u32, upid: UniquePid) -> Option<UniqueTid> {
        let utid = *self.utids_by_tid.get(&tid)?.last()?;
        match self.threads[utid.value() as usize].upid {
            None => Some(utid),
            Some(owner) if owner == upid => Some(utid),
            Some(_) => None,
        }
    }

    fn push_thread(&mut self, tid: u32, start_ts: Option<i64>) -> UniqueTid {
        let utid = UniqueTid::new(self.threads.len() as u32);
        self.threads.push(ThreadEntry {
            tid,
            upid: None,
            start_ts,
        });
        self.utids_by_tid.entry(tid).or_default().push(utid);
        utid
    }

    fn push_process(
        &mut self,
        pid: u32,
        parent: Option<UniquePid>,
        name: StringId,
        start_ts: Option<i64>,
    ) -> UniquePid {
        let upid = UniquePid::new(self.processes.len() as u32);
        self.processes.push(ProcessEntry {
            pid,
            parent,
            name,
            start_ts,
        });
        self.upid_by_pid.insert(pid, upid);
        upid
    }
}

impl IdentityTracker for ProcessTracker {
    fn update_thread(&mut self, tid: u32, pid: u32) -> UniqueTid {
        let upid = self.get_or_create_process(pid);
        let utid = match self.matching_thread(tid, upid) {
            Some(utid) => utid,
            None => {
                debug!(tid, pid, "Thread belongs to another process, starting a new one");
                self.push_thread(tid, None)
            }
        };
        self.threads[utid.value() as usize].upid = Some(upid);
        utid
    }

    fn start_new_thread(&mut self, start_ts: Option<i64>, tid: u32) -> UniqueTid {
        self.push_thread(tid, start_ts)
    }

    fn get_or_create_process(&mut self, pid: u32) -> UniquePid {
        match self.upid_by_pid.get(&pid) {
            Some(upid) => *upid,
            None => self.push_process(pid, None, StringId::NULL, None),
        }
    }

    fn start_new_process(
        &mut self,
        start_ts: Option<i64>,
        parent: Option<UniquePid>,
        pid: u32,
        name: StringId,
    ) -> UniquePid {
        self.push_process(pid, parent, name, start_ts)
    }
}
