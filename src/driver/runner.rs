//! Session Driver
//!
//! Hosts one [`GameSession`] on a tokio task. Collaborators talk to it only
//! through [`SessionHandle`]: commands go in over a queue and are applied one
//! at a time under a single write lock, notices come back on a broadcast
//! channel, and views are read under the same lock.

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::config::GameConfig;
use crate::core::rng::DeterministicRng;
use crate::driver::protocol::{SessionCommand, SessionNotice, SessionView};
use crate::driver::restart::{RestartScheduler, RestartTicket};
use crate::game::session::GameSession;
use crate::game::treasure::TreasureId;

/// Session shared between the driver loop and its handles.
pub type SharedSession = Arc<RwLock<GameSession<DeterministicRng>>>;

/// Driver errors.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The driver loop has exited.
    #[error("Session driver has shut down")]
    Closed,

    /// The driver task panicked or was aborted.
    #[error("Session driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The command loop. Construct with [`SessionDriver::spawn`].
pub struct SessionDriver {
    session: SharedSession,
    commands: mpsc::Receiver<SessionCommand>,
    deferred_tx: mpsc::UnboundedSender<RestartTicket>,
    deferred_rx: mpsc::UnboundedReceiver<RestartTicket>,
    notices: broadcast::Sender<SessionNotice>,
    restart: RestartScheduler,
    shutdown_rx: broadcast::Receiver<()>,
}

impl SessionDriver {
    /// Spawn a driver on the current tokio runtime.
    pub fn spawn(config: GameConfig) -> SessionHandle {
        let (rng, seed) = match config.rng_seed {
            Some(seed) => (DeterministicRng::new(seed), seed),
            None => DeterministicRng::from_entropy(),
        };

        info!(
            seed = %hex::encode(seed.to_be_bytes()),
            treasures = config.placement.count,
            radius = config.placement.radius,
            "Session driver starting"
        );

        let session = Arc::new(RwLock::new(GameSession::new(config.placement.clone(), rng)));
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (deferred_tx, deferred_rx) = mpsc::unbounded_channel();
        let (notice_tx, _) = broadcast::channel(config.notice_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let driver = SessionDriver {
            session: session.clone(),
            commands: command_rx,
            deferred_tx,
            deferred_rx,
            notices: notice_tx.clone(),
            restart: RestartScheduler::new(config.restart_delay),
            shutdown_rx,
        };

        let task = tokio::spawn(driver.run());

        SessionHandle {
            session,
            commands: command_tx,
            notices: notice_tx,
            shutdown: shutdown_tx,
            task: Arc::new(Mutex::new(Some(task))),
        }
    }

    #[instrument(skip(self))]
    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        None => {
                            debug!("All session handles dropped");
                            break;
                        }
                    }
                }
                Some(ticket) = self.deferred_rx.recv() => {
                    self.handle_deferred_start(ticket).await;
                }
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        self.restart.cancel();
        info!("Session driver stopped");
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        debug!(?command, "Handling command");

        let session = self.session.clone();
        let mut session = session.write().await;

        match command {
            SessionCommand::Start => {
                self.cancel_pending_restart();
                session.start();
            }
            SessionCommand::Stop => {
                self.cancel_pending_restart();
                session.stop();
            }
            SessionCommand::Restart => {
                session.stop();
                self.publish_events(&mut session);

                let deferred_tx = self.deferred_tx.clone();
                let scheduled = self.restart.schedule(move |ticket| async move {
                    let _ = deferred_tx.send(ticket);
                });

                if scheduled.superseded {
                    self.notify(SessionNotice::RestartSuperseded);
                }
                self.notify(SessionNotice::RestartScheduled {
                    delay_ms: self.restart.delay().as_millis() as u64,
                });
            }
            SessionCommand::Collect { treasure_id } => {
                session.collect(treasure_id);
            }
        }

        self.publish_events(&mut session);
    }

    async fn handle_deferred_start(&mut self, ticket: RestartTicket) {
        if !self.restart.claim(ticket) {
            return;
        }

        let session = self.session.clone();
        let mut session = session.write().await;
        session.start();
        self.publish_events(&mut session);
    }

    fn cancel_pending_restart(&mut self) {
        if self.restart.cancel() {
            self.notify(SessionNotice::RestartSuperseded);
        }
    }

    fn publish_events(&self, session: &mut GameSession<DeterministicRng>) {
        for event in session.take_events() {
            self.notify(SessionNotice::from(&event));
        }
    }

    fn notify(&self, notice: SessionNotice) {
        // No subscribers is fine
        let _ = self.notices.send(notice);
    }
}

/// Cloneable handle to a running driver.
#[derive(Clone)]
pub struct SessionHandle {
    session: SharedSession,
    commands: mpsc::Sender<SessionCommand>,
    notices: broadcast::Sender<SessionNotice>,
    shutdown: broadcast::Sender<()>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionHandle {
    /// Queue a command.
    pub async fn send(&self, command: SessionCommand) -> Result<(), DriverError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DriverError::Closed)
    }

    /// Start a hunt.
    pub async fn start(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::Start).await
    }

    /// Stop the hunt.
    pub async fn stop(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::Stop).await
    }

    /// Stop now and start again after the restart delay.
    pub async fn restart(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::Restart).await
    }

    /// Report a collection.
    pub async fn collect(&self, treasure_id: TreasureId) -> Result<(), DriverError> {
        self.send(SessionCommand::Collect { treasure_id }).await
    }

    /// Snapshot for rendering and the HUD.
    pub async fn view(&self) -> SessionView {
        let session = self.session.read().await;
        SessionView::capture(&*session)
    }

    /// Subscribe to notices sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionNotice> {
        self.notices.subscribe()
    }

    /// Stop the driver loop and wait for it to exit.
    pub async fn shutdown(&self) -> Result<(), DriverError> {
        let _ = self.shutdown.send(());

        let task = self.task.lock().await.take();
        if let Some(task) = task {
            task.await?;
        }

        Ok(())
    }
}
