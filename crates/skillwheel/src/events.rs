#[derive(Debug, Clone)]
pub enum AppEvent {
    Reload,
    Quit,
}
