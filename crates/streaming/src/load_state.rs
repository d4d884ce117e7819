/// Lifecycle of the data behind a displayed layer.
///
/// Failed is terminal for that layer instance and renders as an empty
/// layer; it never propagates into navigation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded { features: usize },
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::LoadState;

    #[test]
    fn default_is_idle() {
        let s = LoadState::default();
        assert_eq!(s, LoadState::Idle);
        assert!(!s.is_loading());
        assert!(LoadState::Loading.is_loading());
        assert!(!LoadState::Failed("404".into()).is_loading());
    }
}
