//! Development auto-reload.
//!
//! With reload enabled the binary runs as a supervisor: it spawns itself as
//! a worker process that serves requests, watches the executable and any
//! configured source directories, and replaces the worker whenever one of
//! them changes. Rebuilding the binary therefore restarts the server.

use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::net::TcpSocket;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::server::shutdown_signal;

/// Environment variable marking a process as a reload worker.
pub const WORKER_ENV: &str = "ISOGAMES_RELOAD_WORKER";

/// Quiet period collapsing a burst of file events into one restart. Each
/// new event restarts it.
const DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a worker may take to drain in-flight requests after SIGTERM.
const GRACE_PERIOD: Duration = Duration::from_secs(10);

const IGNORED_EXTENSIONS: [&str; 3] = ["swp", "swx", "tmp"];

/// Returns `true` when this process was spawned by the reload supervisor.
#[must_use]
pub fn is_worker() -> bool {
    std::env::var_os(WORKER_ENV).is_some()
}

/// Decides which file system events should restart the worker.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    executable: PathBuf,
    source_dirs: Vec<PathBuf>,
}

impl ChangeFilter {
    /// Create a filter for `executable` and the recursively watched
    /// `source_dirs`. Paths should be absolute, as reported by the watcher.
    #[must_use]
    pub fn new(executable: PathBuf, source_dirs: Vec<PathBuf>) -> Self {
        Self {
            executable,
            source_dirs,
        }
    }

    /// The first path in `event` that warrants a restart, if any.
    #[must_use]
    pub fn relevant_path<'a>(&self, event: &'a Event) -> Option<&'a Path> {
        let kind = &event.kind;
        if !(kind.is_create() || kind.is_modify() || kind.is_remove()) {
            return None;
        }

        event
            .paths
            .iter()
            .map(PathBuf::as_path)
            .find(|path| self.is_relevant(path))
    }

    fn is_relevant(&self, path: &Path) -> bool {
        if path == self.executable {
            return true;
        }

        self.source_dirs.iter().any(|dir| {
            path.strip_prefix(dir)
                .is_ok_and(|relative| !is_ignored(relative))
        })
    }
}

/// Editor scratch files, hidden files and build output.
fn is_ignored(relative: &Path) -> bool {
    if relative.components().any(|c| c.as_os_str() == "target") {
        return true;
    }

    let Some(name) = relative.file_name().and_then(OsStr::to_str) else {
        return false;
    };

    name.starts_with('.')
        || name.ends_with('~')
        || Path::new(name)
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| IGNORED_EXTENSIONS.contains(&ext))
}

/// Fail fast if the listen address is taken, before any worker starts.
///
/// Binds with `SO_REUSEADDR`, like the worker's own listener, so lingering
/// `TIME_WAIT` sockets do not fail the check. Must run inside a Tokio
/// runtime.
///
/// # Errors
///
/// Returns `AppError::Bind` if the address cannot be bound.
pub fn ensure_bindable(addr: SocketAddr) -> Result<(), AppError> {
    let bind_error = |source| AppError::Bind { addr, source };

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_error)?;
    socket.set_reuseaddr(true).map_err(bind_error)?;
    socket.bind(addr).map_err(bind_error)?;
    socket.listen(1).map(drop).map_err(bind_error)
}

/// Map a worker exit status to the supervisor's result.
///
/// # Errors
///
/// Returns `AppError::Worker` for an unsuccessful exit.
pub fn worker_exit_result(status: ExitStatus) -> Result<(), AppError> {
    if status.success() {
        Ok(())
    } else {
        Err(AppError::Worker(status))
    }
}

enum SupervisorEvent {
    Exited(ExitStatus),
    Changed(PathBuf),
    Shutdown,
}

/// Run the reload supervisor until shutdown or until the worker exits on
/// its own.
///
/// # Errors
///
/// Returns an error if the address is unavailable, the watcher cannot be
/// started, the first worker cannot be spawned, or a worker exits
/// unsuccessfully.
pub async fn supervise(config: &ServerConfig) -> Result<(), AppError> {
    let addr = config.socket_addr();
    ensure_bindable(addr)?;

    let executable = std::env::current_exe()?;
    let source_dirs = config
        .reload_dirs
        .iter()
        .map(|dir| {
            std::fs::canonicalize(dir).map_err(|e| {
                AppError::Config(format!("RELOAD_DIRS entry {} cannot be watched: {e}", dir.display()))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (change_tx, mut change_rx) = mpsc::unbounded_channel();
    let _watcher = start_watcher(
        ChangeFilter::new(executable.clone(), source_dirs.clone()),
        change_tx,
    )?;

    info!(
        %addr,
        executable = %executable.display(),
        watched_dirs = ?source_dirs,
        "Reload supervisor started"
    );

    // Subscribed once so a signal arriving mid-restart is not lost.
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut worker = Some(spawn_worker(&executable)?);

    loop {
        let event = tokio::select! {
            status = wait_for(&mut worker) => SupervisorEvent::Exited(status?),
            Some(path) = change_rx.recv() => SupervisorEvent::Changed(path),
            () = &mut shutdown => SupervisorEvent::Shutdown,
        };

        match event {
            SupervisorEvent::Exited(status) => {
                info!(%status, "Server worker exited");
                return worker_exit_result(status);
            }
            SupervisorEvent::Changed(path) => {
                settle(&mut change_rx, DEBOUNCE).await;

                info!(path = %path.display(), "Change detected, restarting server worker");
                if let Some(mut running) = worker.take() {
                    stop_worker(&mut running, GRACE_PERIOD).await?;
                }
                worker = match spawn_worker(&executable) {
                    Ok(child) => Some(child),
                    Err(e) => {
                        error!(error = %e, "failed to start server worker, waiting for the next change");
                        None
                    }
                };
            }
            SupervisorEvent::Shutdown => {
                if let Some(mut running) = worker.take() {
                    stop_worker(&mut running, GRACE_PERIOD).await?;
                }
                return Ok(());
            }
        }
    }
}

/// Wait until no change has arrived for `quiet`, discarding the burst.
async fn settle(change_rx: &mut mpsc::UnboundedReceiver<PathBuf>, quiet: Duration) {
    while let Ok(Some(_)) = tokio::time::timeout(quiet, change_rx.recv()).await {}
}

async fn wait_for(worker: &mut Option<Child>) -> std::io::Result<ExitStatus> {
    match worker {
        Some(child) => child.wait().await,
        None => std::future::pending().await,
    }
}

fn start_watcher(
    filter: ChangeFilter,
    change_tx: mpsc::UnboundedSender<PathBuf>,
) -> Result<RecommendedWatcher, AppError> {
    let executable_dir = filter.executable.parent().map(Path::to_path_buf);
    let source_dirs = filter.source_dirs.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Some(path) = filter.relevant_path(&event) {
                    debug!(path = %path.display(), kind = ?event.kind, "relevant change");
                    let _ = change_tx.send(path.to_path_buf());
                }
            }
            Err(e) => warn!(error = %e, "file watch error"),
        },
        Config::default(),
    )?;

    if let Some(dir) = executable_dir {
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    }
    for dir in &source_dirs {
        watcher.watch(dir, RecursiveMode::Recursive)?;
    }

    Ok(watcher)
}

fn spawn_worker(executable: &Path) -> Result<Child, AppError> {
    let child = Command::new(executable)
        .args(std::env::args_os().skip(1))
        .env(WORKER_ENV, "1")
        .kill_on_drop(true)
        .spawn()?;

    debug!(pid = ?child.id(), "spawned server worker");
    Ok(child)
}

/// Ask the worker to shut down gracefully, killing it if it is still
/// running after `grace`.
async fn stop_worker(worker: &mut Child, grace: Duration) -> Result<ExitStatus, AppError> {
    if let Some(status) = worker.try_wait()? {
        return Ok(status);
    }

    if request_termination(worker) {
        if let Ok(status) = tokio::time::timeout(grace, worker.wait()).await {
            return Ok(status?);
        }
        warn!(grace_secs = grace.as_secs_f64(), "server worker ignored SIGTERM, killing it");
    }

    worker.kill().await?;
    Ok(worker.wait().await?)
}

/// Sends SIGTERM so the worker runs its graceful shutdown. Returns `false`
/// when no signal could be delivered.
#[cfg(unix)]
fn request_termination(worker: &Child) -> bool {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(pid) = worker.id().and_then(|id| i32::try_from(id).ok()) else {
        return false;
    };

    match kill(Pid::from_raw(pid), Signal::SIGTERM) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, pid, "failed to send SIGTERM to server worker");
            false
        }
    }
}

#[cfg(not(unix))]
fn request_termination(_worker: &Child) -> bool {
    false
}
