use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BarKind {
    #[default]
    Regular,
    Cluster,
    Doublet,
}

/// One filled rectangle of the band, spanning `[offset, offset + width)`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub offset: u32,
    pub width: u32,
    #[serde(default)]
    pub kind: BarKind,
}

impl Bar {
    pub fn new(offset: u32, width: u32, kind: BarKind) -> Self { Self { offset, width, kind } }

    pub fn end(&self) -> u32 { self.offset.saturating_add(self.width) }
}

impl fmt::Display for BarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BarKind::Regular => "regular",
            BarKind::Cluster => "cluster",
            BarKind::Doublet => "doublet",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}+{}", self.kind, self.offset, self.width)
    }
}
