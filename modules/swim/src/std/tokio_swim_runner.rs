//! Tokio-backed event loop around the shell.

use alloc::{boxed::Box, sync::Arc};

use lifebuoy_utils_rs::core::time::MonotonicClock;
use tokio::sync::{mpsc, oneshot};

use super::{
  AssociationProvider, SwimCommand, SwimEventListener, SwimShell, SwimShellError, SwimTransport,
  TokioSwimRunnerConfig,
};
use crate::core::{detection::SwimSettings, membership::{MembershipSnapshot, SwimNode}};

/// Owns the spawned event loop driving a [`SwimShell`].
///
/// Commands from the transport and from higher layers funnel through one
/// queue, processed in FIFO order by a single task; that task is the
/// only place the instance is ever touched.
pub struct TokioSwimRunner {
  commands: mpsc::Sender<SwimCommand>,
  shutdown: Option<oneshot::Sender<()>>,
  task:     Option<tokio::task::JoinHandle<()>>,
  runtime:  tokio::runtime::Handle,
}

impl TokioSwimRunner {
  /// Validates the settings, spawns the event loop, and returns the
  /// running handle.
  ///
  /// # Errors
  ///
  /// Returns [`SwimShellError::InvalidSettings`] when the settings fail
  /// validation.
  pub fn start(
    config: &TokioSwimRunnerConfig,
    local: SwimNode,
    settings: SwimSettings,
    transport: Arc<dyn SwimTransport>,
    associations: Arc<dyn AssociationProvider>,
    clock: Arc<dyn MonotonicClock>,
    listener: Box<dyn SwimEventListener>,
    runtime: tokio::runtime::Handle,
  ) -> Result<Self, SwimShellError> {
    if let Err(reason) = settings.validate() {
      return Err(SwimShellError::InvalidSettings { reason });
    }

    let (commands, mut inbox) = mpsc::channel(config.command_buffer);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let loop_commands = commands.clone();
    let task = runtime.spawn(async move {
      let mut shell =
        SwimShell::new(local, settings, transport, associations, clock, listener, loop_commands);
      shell.start();
      loop {
        tokio::select! {
          _ = &mut shutdown_rx => {
            break;
          }
          received = inbox.recv() => {
            let Some(command) = received else {
              break;
            };
            shell.handle_command(command);
          }
        }
      }
    });

    Ok(Self { commands, shutdown: Some(shutdown_tx), task: Some(task), runtime })
  }

  /// Queue feeding the event loop; transports push inbound messages
  /// through clones of this sender.
  #[must_use]
  pub fn commands(&self) -> mpsc::Sender<SwimCommand> {
    self.commands.clone()
  }

  /// Requests that the shell begin monitoring a node.
  pub async fn monitor(&self, node: SwimNode) {
    let _ = self.commands.send(SwimCommand::Monitor { node }).await;
  }

  /// Declares a node dead on behalf of a higher layer.
  pub async fn confirm_dead(&self, node: SwimNode) {
    let _ = self.commands.send(SwimCommand::ConfirmDead { node }).await;
  }

  /// Fetches a snapshot of the node-to-status mapping.
  pub async fn membership_state(&self) -> Option<MembershipSnapshot> {
    let (reply_to, reply) = oneshot::channel();
    self.commands.send(SwimCommand::GetMembershipState { reply_to }).await.ok()?;
    reply.await.ok()
  }

  /// Stops the event loop.
  ///
  /// # Errors
  ///
  /// Returns [`SwimShellError::NotStarted`] when already stopped.
  pub fn stop(&mut self) -> Result<(), SwimShellError> {
    let shutdown = self.shutdown.take().ok_or(SwimShellError::NotStarted)?;
    let _ = shutdown.send(());
    if let Some(task) = self.task.take() {
      let _ = self.runtime.spawn(async move {
        let _ = task.await;
      });
    }
    Ok(())
  }
}
