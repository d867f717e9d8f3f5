//! Background task that keeps the map center in step with its sources.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use worldwise_core::{Place, Position};

use crate::geolocation::GeolocationState;
use crate::resolver::{NavigationIntent, PositionResolver};
use crate::url_position::UrlPositionSource;

#[derive(Debug)]
enum Command {
    Click(Position),
    Open(NavigationIntent),
}

/// Handle to a running map-center task.
///
/// Dropping the handle stops the task. Intents queue without bound until
/// [`MapCenter::next_intent`] takes them, one per click or opened place.
pub struct MapCenter {
    center: watch::Receiver<Position>,
    intents: mpsc::UnboundedReceiver<NavigationIntent>,
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl MapCenter {
    /// The center as last published.
    #[must_use]
    pub fn center(&self) -> Position {
        *self.center.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Position> {
        self.center.clone()
    }

    /// Reports a click on the map. The center moves there and a
    /// [`NavigationIntent::NewPlaceForm`] follows on [`MapCenter::next_intent`].
    pub fn click(&self, at: Position) {
        self.send(Command::Click(at));
    }

    /// Asks to open a place's detail page. Only an intent is emitted; the
    /// center follows once the navigation lands in the URL.
    pub fn open_place(&self, place: &Place) {
        self.send(Command::Open(NavigationIntent::show_place(place)));
    }

    /// Next navigation the UI layer should perform, or `None` once the task
    /// has stopped.
    pub async fn next_intent(&mut self) -> Option<NavigationIntent> {
        self.intents.recv().await
    }

    /// Stops the task and waits for it to finish.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "map center task did not stop cleanly");
        }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("map center task has stopped; input dropped");
        }
    }
}

/// Spawns the task that resolves the map center.
///
/// The initial center is resolved before this returns. Afterwards the center
/// is re-evaluated whenever the URL position changes or the device location
/// resolves (even to the same coordinates), and moved directly on each click.
/// A source whose sender goes away simply stops contributing updates.
pub fn spawn_map_center(
    mut resolver: PositionResolver,
    mut urls: UrlPositionSource,
    mut geolocation: watch::Receiver<GeolocationState>,
) -> MapCenter {
    let mut from_url = urls.current();
    let (mut geolocated, mut resolutions) = {
        let state = geolocation.borrow_and_update();
        (state.position, state.resolutions)
    };
    let initial = resolver.resolve(from_url, geolocated);

    let (center_tx, center) = watch::channel(initial);
    let (commands, mut command_rx) = mpsc::unbounded_channel();
    let (intent_tx, intents) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let publish = |position: Position| {
            center_tx.send_if_modified(|current| {
                if *current == position {
                    return false;
                }
                tracing::debug!(%position, "map center moved");
                *current = position;
                true
            });
        };
        let mut urls_open = true;
        let mut geo_open = true;

        loop {
            tokio::select! {
                // Source updates drain before commands.
                biased;

                changed = urls.changed(), if urls_open => match changed {
                    Ok(position) if position != from_url => {
                        from_url = position;
                        publish(resolver.resolve(from_url, geolocated));
                    }
                    Ok(_) => {}
                    Err(_) => urls_open = false,
                },
                changed = geolocation.changed(), if geo_open => match changed {
                    Ok(()) => {
                        let (position, resolved) = {
                            let state = geolocation.borrow_and_update();
                            (state.position, state.resolutions)
                        };
                        if position != geolocated || resolved != resolutions {
                            geolocated = position;
                            resolutions = resolved;
                            publish(resolver.resolve(from_url, geolocated));
                        }
                    }
                    Err(_) => geo_open = false,
                },
                command = command_rx.recv() => {
                    let intent = match command {
                        Some(Command::Click(at)) => {
                            let intent = resolver.click(at);
                            publish(at);
                            intent
                        }
                        Some(Command::Open(intent)) => intent,
                        None => break,
                    };
                    tracing::debug!(%intent, "navigation requested");
                    if intent_tx.send(intent).is_err() {
                        break;
                    }
                }
            }
        }
    });

    MapCenter {
        center,
        intents,
        commands,
        task,
    }
}
