use foundation::AdminLevel;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

impl LayerId {
    /// One region layer per level is on screen at a time; its id is the depth.
    pub fn for_level(level: AdminLevel) -> Self {
        Self(level.depth() as u64)
    }
}

pub trait Layer {
    fn id(&self) -> LayerId;
}
