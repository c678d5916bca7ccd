//! Cross-thread access to the viewer
//!
//! Every scene mutation runs on the thread that owns [`ViewerCore`]. Other
//! threads hold a cloneable [`ViewerHandle`] that enqueues [`ViewerCommand`]s;
//! the owner drains the queue once per frame, in submission order.

use pointview_core::{Error, LabeledPoint, Result, UnitScale};

use crate::input::{InputEvent, InputResponse};
use crate::viewer::{ViewSnapshot, ViewerCore};

/// Deferred closure run against the viewer on its own thread
pub type RenderTask = Box<dyn FnOnce(&mut ViewerCore) + Send + 'static>;

pub enum ViewerCommand {
    SetUnitScales(UnitScale),
    VisualizeData(Vec<LabeledPoint>),
    ResetView,
    Input(InputEvent),
    Snapshot(flume::Sender<ViewSnapshot>),
    Run(RenderTask),
}

impl std::fmt::Debug for ViewerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetUnitScales(scale) => f.debug_tuple("SetUnitScales").field(scale).finish(),
            Self::VisualizeData(points) => write!(f, "VisualizeData({} points)", points.len()),
            Self::ResetView => write!(f, "ResetView"),
            Self::Input(event) => f.debug_tuple("Input").field(event).finish(),
            Self::Snapshot(_) => write!(f, "Snapshot"),
            Self::Run(_) => write!(f, "Run"),
        }
    }
}

/// Sending side of the command queue, safe to clone and move across threads
#[derive(Debug, Clone)]
pub struct ViewerHandle {
    sender: flume::Sender<ViewerCommand>,
}

impl ViewerHandle {
    pub fn send(&self, command: ViewerCommand) -> Result<()> {
        self.sender.send(command).map_err(|_| Error::ViewerClosed)
    }

    pub fn set_unit_scales(&self, unit_scale: UnitScale) -> Result<()> {
        self.send(ViewerCommand::SetUnitScales(unit_scale))
    }

    /// Replace the displayed data; the call returns before the scene is rebuilt
    pub fn visualize_data(&self, points: Vec<LabeledPoint>) -> Result<()> {
        self.send(ViewerCommand::VisualizeData(points))
    }

    pub fn reset_view(&self) -> Result<()> {
        self.send(ViewerCommand::ResetView)
    }

    pub fn send_input(&self, event: InputEvent) -> Result<()> {
        self.send(ViewerCommand::Input(event))
    }

    pub fn run_on_render_thread<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut ViewerCore) + Send + 'static,
    {
        self.send(ViewerCommand::Run(Box::new(task)))
    }

    /// Block until the render thread reports its state.
    ///
    /// Must not be called from the render thread itself.
    pub fn snapshot(&self) -> Result<ViewSnapshot> {
        let (reply, response) = flume::bounded(1);
        self.send(ViewerCommand::Snapshot(reply))?;
        response.recv().map_err(|_| Error::ViewerClosed)
    }
}

/// Receiving side, owned by the render thread
#[derive(Debug)]
pub struct CommandQueue {
    sender: flume::Sender<ViewerCommand>,
    receiver: flume::Receiver<ViewerCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    pub fn handle(&self) -> ViewerHandle {
        ViewerHandle {
            sender: self.sender.clone(),
        }
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Apply every queued command to `core`, returning how many ran
    pub fn drain(&self, core: &mut ViewerCore) -> usize {
        let mut applied = 0;
        for command in self.receiver.try_iter() {
            execute(core, command);
            applied += 1;
        }
        applied
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn execute(core: &mut ViewerCore, command: ViewerCommand) {
    match command {
        ViewerCommand::SetUnitScales(unit_scale) => core.set_unit_scales(unit_scale),
        ViewerCommand::VisualizeData(points) => core.visualize_data(&points),
        ViewerCommand::ResetView => core.reset_view(),
        ViewerCommand::Input(event) => match core.handle_input(&event) {
            InputResponse::ContextMenu(menu) => {
                let entries: Vec<String> = menu
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{}. {}", i + 1, item.label()))
                    .collect();
                log::info!("Context menu: {} (Esc to close)", entries.join(", "));
            }
            InputResponse::Help(text) => log::info!("{}", text),
            InputResponse::Ignored | InputResponse::Action(_) => {}
        },
        ViewerCommand::Snapshot(reply) => {
            // the requester may have given up waiting
            let _ = reply.send(core.snapshot());
        }
        ViewerCommand::Run(task) => task(core),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ContextMenuItem, ViewKey};
    use crate::scene::SceneState;
    use std::thread;

    #[test]
    fn test_commands_apply_in_order() {
        let queue = CommandQueue::new();
        let handle = queue.handle();
        let mut core = ViewerCore::default();

        handle.set_unit_scales(UnitScale::new(1.0, 1.0, 2.0)).unwrap();
        handle
            .visualize_data(vec![LabeledPoint::new(0.0, 0.0, 0.0, "A")])
            .unwrap();
        handle.send_input(InputEvent::Key(ViewKey::TiltUp)).unwrap();
        assert_eq!(queue.pending(), 3);

        assert_eq!(queue.drain(&mut core), 3);
        assert_eq!(core.scene().state(), SceneState::Populated);
        assert_eq!(core.unit_scale(), UnitScale::new(1.0, 1.0, 2.0));
        assert_eq!(core.transform_state().rotate_x, 2.0);

        handle.reset_view().unwrap();
        queue.drain(&mut core);
        assert!(core.transform_state().is_identity());
    }

    #[test]
    fn test_nothing_happens_until_drained() {
        let queue = CommandQueue::new();
        let mut core = ViewerCore::default();

        queue
            .handle()
            .visualize_data(vec![LabeledPoint::new(1.0, 2.0, 3.0, "A")])
            .unwrap();
        assert_eq!(core.scene().point_count(), 0);

        queue.drain(&mut core);
        assert_eq!(core.scene().point_count(), 1);
        assert_eq!(queue.drain(&mut core), 0);
    }

    #[test]
    fn test_run_on_render_thread() {
        let queue = CommandQueue::new();
        let mut core = ViewerCore::default();

        queue
            .handle()
            .run_on_render_thread(|core| core.clear_colors())
            .unwrap();
        queue.handle().send_input(InputEvent::ContextMenuRequested).unwrap();
        assert_eq!(queue.drain(&mut core), 2);
        assert!(core.menu_open());
    }

    #[test]
    fn test_menu_choice_through_queue() {
        let queue = CommandQueue::new();
        let handle = queue.handle();
        let mut core = ViewerCore::default();

        for event in [
            InputEvent::Key(ViewKey::TurnLeft),
            InputEvent::ContextMenuRequested,
            InputEvent::ContextMenuSelected(ContextMenuItem::ResetView),
        ] {
            handle.send_input(event).unwrap();
        }
        queue.drain(&mut core);

        assert!(core.transform_state().is_identity());
        assert!(!core.menu_open());
    }

    #[test]
    fn test_closed_queue_reports_error() {
        let handle = CommandQueue::new().handle();
        assert!(matches!(handle.reset_view(), Err(Error::ViewerClosed)));
        assert!(matches!(handle.snapshot(), Err(Error::ViewerClosed)));
    }

    #[test]
    fn test_snapshot_from_another_thread() {
        let queue = CommandQueue::new();
        let handle = queue.handle();

        let producer = thread::spawn(move || {
            handle
                .visualize_data(vec![
                    LabeledPoint::new(0.0, 0.0, 0.0, "A"),
                    LabeledPoint::new(4.0, 4.0, 0.0, "B"),
                ])
                .unwrap();
            handle.snapshot().unwrap()
        });

        let mut core = ViewerCore::default();
        while !producer.is_finished() {
            queue.drain(&mut core);
            thread::yield_now();
        }

        let snapshot = producer.join().unwrap();
        assert_eq!(snapshot.point_count, 2);
        assert_eq!(snapshot.scene_state, SceneState::Populated);
        assert_eq!(snapshot.colors.len(), 2);
    }
}
