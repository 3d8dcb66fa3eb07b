pub mod shapefall;

/// Metadata shown in the window title and `--help`
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const SHAPEFALL: GameInfo = GameInfo {
    id: "shapefall",
    name: "Shapefall",
    description: "Click the falling shapes before they hit the floor",
};
