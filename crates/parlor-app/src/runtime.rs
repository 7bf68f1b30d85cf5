//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Driver`]: Platform-specific I/O

use parlor_proto::RoomId;

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver.
    pub fn new(driver: D) -> Self {
        Self { driver, app: App::new() }
    }

    /// Run the main event loop with `room` as the first active room.
    ///
    /// Returns once the app quits. The final state stays available through
    /// [`Runtime::app`].
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or a session cannot be
    /// established. Backlog and send failures are reported to the user and
    /// the loop continues.
    pub async fn run(&mut self, room: RoomId) -> Result<(), D::Error> {
        let (cols, rows) = self.driver.size();
        let mut quit = self.process_event(AppEvent::Resize(cols, rows)).await?;
        if !quit {
            quit = self.process_event(AppEvent::RoomSelected { room }).await?;
        }

        while !quit {
            let Some(event) = self.driver.poll_event().await? else {
                continue;
            };
            quit = self.process_event(event).await?;
        }

        self.driver.close().await;
        Ok(())
    }

    /// Feed one event to the App and execute the resulting actions.
    ///
    /// Returns `true` if the application should quit.
    async fn process_event(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.app.handle(event);
        self.process_actions(actions).await
    }

    /// Process actions returned by the App.
    ///
    /// Actions run in order. Events they produce are fed back to the App and
    /// their actions run after the current batch.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                let event = match action {
                    AppAction::Render => {
                        self.driver.render(&self.app)?;
                        None
                    },
                    AppAction::Quit => return Ok(true),
                    AppAction::FetchBacklog { room } => {
                        Some(match self.driver.fetch_backlog(&room).await {
                            Ok(events) => {
                                tracing::debug!(%room, count = events.len(), "backlog loaded");
                                AppEvent::Backlog { room, events }
                            },
                            Err(e) => {
                                tracing::warn!(%room, error = %e, "backlog fetch failed");
                                AppEvent::BacklogUnavailable { room, message: e.to_string() }
                            },
                        })
                    },
                    AppAction::Subscribe { room } => {
                        self.driver.connect(&room).await?;
                        Some(AppEvent::Subscribed)
                    },
                    AppAction::SendMessage { room, content } => {
                        match self.driver.send(&room, &content).await {
                            Ok(()) => None,
                            Err(e) => {
                                tracing::warn!(%room, error = %e, "send failed");
                                Some(AppEvent::Error { message: e.to_string() })
                            },
                        }
                    },
                    AppAction::CloseSession => {
                        self.driver.close().await;
                        None
                    },
                    AppAction::NavigateRooms => Some(match self.driver.next_room() {
                        Some(room) => AppEvent::RoomSelected { room },
                        None => AppEvent::Error { message: "no other rooms".to_string() },
                    }),
                };

                if let Some(event) = event {
                    pending_actions.extend(self.app.handle(event));
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
