use ringctl::protocol::Command;
use async_channel::Sender;
use ringmenu::{CompletionToken, ContainerId, Point};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Toggle(ContainerId),
    Click(ContainerId, Option<Point>),
    Enter(ContainerId),
    Leave(ContainerId),
    Move(ContainerId, Option<Point>),
    /// The status line is also sent on the reply channel when one is attached.
    Status(ContainerId, Option<Sender<String>>),
    AnimationDone(CompletionToken),
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Toggle(menu) => AppEvent::Toggle(menu),
            Command::Click(menu, p) => AppEvent::Click(menu, p),
            Command::Enter(menu) => AppEvent::Enter(menu),
            Command::Leave(menu) => AppEvent::Leave(menu),
            Command::Move(menu, p) => AppEvent::Move(menu, p),
            Command::Status(menu) => AppEvent::Status(menu, None),
            Command::Reload => AppEvent::ConfigReload,
        }
    }
}
